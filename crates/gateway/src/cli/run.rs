//! `nagproxy run` — one-shot pipeline call.
//!
//! Wraps the message as a single user turn, runs it through exactly the
//! same pipeline as `POST /api/chat`, and prints the reply.

use std::sync::Arc;

use np_domain::config::Config;
use np_providers::{LlmProvider, ScriptedProvider};

use crate::api::error::normalize;
use crate::bootstrap;
use crate::runtime::random::ThreadRandom;
use crate::runtime::run_chat;

const DRY_RUN_REPLY: &str = "(dry run) upstream not contacted";

pub async fn run(
    config: Arc<Config>,
    message: String,
    json_output: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let state = if dry_run {
        let provider = Arc::new(ScriptedProvider::replying(DRY_RUN_REPLY)) as Arc<dyn LlmProvider>;
        bootstrap::build_app_state_with(config, Some(provider), Arc::new(ThreadRandom))
    } else {
        bootstrap::build_app_state(config)?
    };

    let body = serde_json::to_vec(&serde_json::json!({
        "messages": [{ "role": "user", "content": message }],
    }))?;

    match run_chat(state.orchestrator.as_deref(), &state.settings, &body).await {
        Ok(result) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.reply_text);
            }
            Ok(())
        }
        Err(e) => {
            let (status, body) = normalize(&e);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            anyhow::bail!("{} ({status})", e)
        }
    }
}
