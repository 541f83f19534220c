//! Environment overlay applied on top of the config file.
//!
//! Secrets and the nag lists are deployment concerns, so they are read from
//! the process environment after `config.toml` has been parsed.

use serde_json::Value;

use super::Config;
use crate::turn::coerce_text;

pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_LUXURY_ITEMS: &str = "LUXURY_ITEMS";
pub const ENV_WANT_ITEMS: &str = "WANT_ITEMS";
pub const ENV_PERSON_NAMES: &str = "PERSON_NAMES";

impl Config {
    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    ///
    /// A list variable that is set but malformed stays configured with no
    /// entries: its nag variant is still selected and produces nothing, so a
    /// broken `LUXURY_ITEMS` cannot hand over to the static nag.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(model) = get(ENV_MODEL) {
            self.llm.model = model;
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.llm.base_url = base_url;
        }

        for (name, slot) in [
            (ENV_LUXURY_ITEMS, &mut self.nag.luxury_items),
            (ENV_WANT_ITEMS, &mut self.nag.want_items),
            (ENV_PERSON_NAMES, &mut self.nag.person_names),
        ] {
            let Some(raw) = get(name) else { continue };
            match parse_string_list(&raw) {
                Some(list) => *slot = Some(list),
                None => {
                    tracing::warn!(env_var = name, "not a JSON array, feature disabled");
                    *slot = Some(Vec::new());
                }
            }
        }
    }
}

/// Parse a JSON-encoded array into strings.
///
/// Elements are coerced with [`coerce_text`]. Returns `None` when `raw` is
/// not valid JSON or not an array.
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    Some(
        items
            .into_iter()
            .map(|v| coerce_text(&v))
            .collect(),
    )
}
