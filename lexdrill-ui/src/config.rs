//! Configuration loading and data folder resolution
//!
//! Resolution priority for every setting:
//! 1. Command-line argument
//! 2. Environment variable (via clap)
//! 3. TOML config file
//! 4. Compiled default

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lexdrill_core::{Error, Result};
use serde::Deserialize;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5730;
/// Default idle lifetime of a quiz session before eviction
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 1800;
/// File name of the persisted vocabulary document
pub const DOCUMENT_FILE: &str = "lexdrill.json";

/// Command-line interface
#[derive(Parser, Debug, Default)]
#[command(name = "lexdrill-ui", about = "LexDrill vocabulary drill server")]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "LEXDRILL_PORT")]
    pub port: Option<u16>,

    /// Folder holding the vocabulary document
    #[arg(long, env = "LEXDRILL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Idle seconds before a quiz session is evicted
    #[arg(long, env = "LEXDRILL_SESSION_TIMEOUT_SECS")]
    pub session_timeout_secs: Option<u64>,

    /// Path to a TOML config file
    #[arg(long, env = "LEXDRILL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Optional settings from the TOML config file
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub session_timeout_secs: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub session_timeout: Duration,
}

impl Config {
    /// Resolve the effective configuration from CLI, environment, config
    /// file, and defaults.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => load_config_file(path)?,
            None => default_config_file()
                .map(|path| load_config_file(&path))
                .transpose()?
                .unwrap_or_default(),
        };

        let data_dir = cli
            .data_dir
            .clone()
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        Ok(Self {
            port: cli.port.or(file.port).unwrap_or(DEFAULT_PORT),
            data_dir,
            session_timeout: Duration::from_secs(
                cli.session_timeout_secs
                    .or(file.session_timeout_secs)
                    .unwrap_or(DEFAULT_SESSION_TIMEOUT_SECS),
            ),
        })
    }

    /// Path of the persisted document inside the data folder.
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(DOCUMENT_FILE)
    }

    /// Create the data folder if it does not exist yet.
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

fn load_config_file(path: &std::path::Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))
}

/// Default config file location (`<config_dir>/lexdrill/config.toml`), only
/// if it exists.
fn default_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("lexdrill").join("config.toml");
    path.exists().then_some(path)
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lexdrill"))
        .unwrap_or_else(|| PathBuf::from("./lexdrill_data"))
}
