// Configuration management for ipv6-route-show
// Supports CLI arguments, config file (TOML), and environment variables

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

use crate::error::AppError;

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["ipv6-route-show.toml", "config.toml"];

/// Print the IPv6 routing table reported by `netsh interface ipv6 show route verbose`
#[derive(Parser, Debug, Clone)]
#[command(name = "ipv6-route-show")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Parse a saved netsh capture instead of running netsh
    #[arg(short, long, env = "IPV6RS_INPUT")]
    pub input: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(short, long, env = "IPV6RS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Path to configuration file
    #[arg(short, long, env = "IPV6RS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Configuration file structure (TOML format)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Where route text comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Saved capture to parse; the live netsh command is used when unset
    #[serde(default)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

/// Merged configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub log_level: Level,
    /// The config file that was loaded, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources (CLI args, config file, defaults)
    /// Priority: CLI args / environment variables > Config file > Defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(cli_args: CliArgs) -> anyhow::Result<Self> {
        let (config_file, config_path) = match &cli_args.config {
            Some(path) => (read_config_file(path)?, Some(path.clone())),
            None => {
                let found = DEFAULT_CONFIG_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|path| path.exists());
                match found {
                    Some(path) => (read_config_file(&path)?, Some(path)),
                    None => (ConfigFile::default(), None),
                }
            }
        };

        let input = cli_args.input.or(config_file.source.input);
        let log_level = parse_log_level(
            cli_args
                .log_level
                .as_deref()
                .unwrap_or(&config_file.logging.level),
        )?;

        Ok(Config {
            input,
            log_level,
            config_path,
        })
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;
    let config = toml::from_str::<ConfigFile>(&content).map_err(|e| {
        AppError::Config(format!("failed to parse {}: {}", path.display(), e))
    })?;
    Ok(config)
}

fn parse_log_level(level_str: &str) -> anyhow::Result<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(AppError::Config(format!("Invalid log level: {}", level_str)).into()),
    }
}
