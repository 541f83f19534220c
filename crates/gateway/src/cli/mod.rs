pub mod config;
pub mod run;

use clap::{Parser, Subcommand};

/// NagProxy: a chat proxy that appends a promotional nag to every reply.
#[derive(Debug, Parser)]
#[command(name = "nagproxy", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Send a single user message through the pipeline and print the reply.
    Run {
        /// The message to send.
        message: String,
        /// Output the full response as JSON instead of plain text.
        #[arg(long)]
        json: bool,
        /// Answer from a local canned upstream instead of the real service.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "NAGPROXY_CONFIG";

/// Load the configuration from the path specified by `NAGPROXY_CONFIG` (or
/// `config.toml` by default), then overlay the process environment.
/// Returns the resolved [`Config`] and the path that was used.
pub fn load_config() -> anyhow::Result<(np_domain::config::Config, String)> {
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".into());

    let mut config: np_domain::config::Config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        np_domain::config::Config::default()
    };
    config.apply_env();

    Ok((config, config_path))
}
