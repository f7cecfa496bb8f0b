//! Loads a `[server]` / `[mysql]` configuration from INI text and writes it
//! back in canonical form.

use anyhow::Context;
use clap::Parser;
use iniconf::{Ini, IniConfig};
use log::{debug, info};
use std::path::PathBuf;

/// Root configuration: one section per member.
#[derive(Debug, Clone, Default, PartialEq, Ini)]
struct Config {
    server: Server,
    #[ini(rename = "mysql")]
    database: Mysql,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Ini)]
struct Server {
    ip: String,
    port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// MySQL connection settings.
#[derive(Debug, Clone, PartialEq, Ini)]
struct Mysql {
    username: String,
    password: String,
    database: String,
    host: String,
    port: u16,
    /// Connect timeout in seconds.
    timeout: f32,
}

impl Default for Mysql {
    fn default() -> Self {
        Self {
            username: "root".to_string(),
            password: String::new(),
            database: String::new(),
            host: "127.0.0.1".to_string(),
            port: 3306,
            timeout: 1.5,
        }
    }
}

/// Command-line options for the demo.
#[derive(Parser)]
#[command(name = "server-config", version)]
struct Cli {
    /// Optional path to an INI config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective config to this path
    #[arg(long)]
    write: Option<PathBuf>,
    /// Print the effective config to stdout
    #[arg(long)]
    print: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let config = match cli.config.as_ref() {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => {
            debug!("no config path given; using defaults");
            Config::default()
        }
    };
    info!(
        "effective config (server={}:{}, mysql={}@{}:{}, timeout={}s)",
        config.server.ip,
        config.server.port,
        config.database.username,
        config.database.host,
        config.database.port,
        config.database.timeout
    );

    if let Some(path) = cli.write.as_ref() {
        config
            .save_to_path(path)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        info!("wrote config to {}", path.display());
    }

    if cli.print {
        let text = config.to_ini_string().context("failed to render config")?;
        print!("{text}");
    }

    Ok(())
}
