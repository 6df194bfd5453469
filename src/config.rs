use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Partial configuration collected from defaults, an optional JSON config
/// file, environment variables, and CLI arguments. Later sources override
/// earlier ones.
#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default)]
#[clap(about = "Simulated petrochemical plant monitoring backend", version)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[clap(long, env = "PETROMON_PORT", help = "Port to listen on for REST and WebSocket clients.")]
    pub port: Option<u16>,

    #[clap(long, env = "PETROMON_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "PETROMON_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "PETROMON_LOG_LEVEL", help = "Logging level (debug, info, warn, error).")]
    pub log_level: Option<String>,

    #[clap(long, env = "PETROMON_PUSH_INTERVAL_SECONDS", help = "Seconds between snapshot broadcasts to WebSocket clients.")]
    pub push_interval_secs: Option<u64>,

    #[clap(long, env = "PETROMON_SHUTDOWN_GRACE_SECONDS", help = "Seconds to wait for in-flight work before forcing shutdown.")]
    pub shutdown_grace_secs: Option<u64>,
}

impl ConfigOverrides {
    // Merge two override sets, where 'other' wins for Some values
    fn merge(self, other: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            port: other.port.or(self.port),
            config_path: other.config_path.or(self.config_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            push_interval_secs: other.push_interval_secs.or(self.push_interval_secs),
            shutdown_grace_secs: other.shutdown_grace_secs.or(self.shutdown_grace_secs),
        }
    }
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub push_interval_secs: u64,
    pub shutdown_grace_secs: u64,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            push_interval_secs: 5,
            shutdown_grace_secs: 5,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    fn from_overrides(overrides: ConfigOverrides) -> Self {
        let defaults = Config::default();
        Config {
            port: overrides.port.unwrap_or(defaults.port),
            push_interval_secs: overrides
                .push_interval_secs
                .unwrap_or(defaults.push_interval_secs),
            shutdown_grace_secs: overrides
                .shutdown_grace_secs
                .unwrap_or(defaults.shutdown_grace_secs),
            log_dir: overrides.log_dir.unwrap_or(defaults.log_dir),
            log_level: overrides.log_level.unwrap_or(defaults.log_level),
        }
    }
}

/// Loads configuration: defaults, then `petromon.conf` (or the file named by
/// `--config-path`), then environment variables and CLI arguments.
pub fn load_config() -> Config {
    let cli_args = ConfigOverrides::parse();

    let config_file_path = cli_args
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("petromon.conf"));

    let mut current = ConfigOverrides::default();

    if config_file_path.exists() {
        if let Ok(config_str) = fs::read_to_string(&config_file_path) {
            if let Ok(file_config) = serde_json::from_str::<ConfigOverrides>(&config_str) {
                current = current.merge(file_config);
            } else {
                log::warn!(
                    "Failed to parse config file: {}. Falling back to other sources.",
                    config_file_path.display()
                );
            }
        } else {
            log::warn!(
                "Failed to read config file: {}. Falling back to other sources.",
                config_file_path.display()
            );
        }
    }

    current = current.merge(cli_args);

    Config::from_overrides(current)
}
