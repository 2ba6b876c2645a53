use clap::Parser;
use fio_common::{
    config::{DEFAULT_BUNDLE_COUNT, DEFAULT_DOMAIN, DEFAULT_FAUCET_FUNDS, VERSION},
    logging::{default_logs_datetime_format, LogLevel, ModuleConfig},
};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LOGS_PATH, DEFAULT_LOG_FILENAME, DEFAULT_RPC_BIND_ADDRESS};

// Functions Helpers
fn default_rpc_bind_address() -> String {
    DEFAULT_RPC_BIND_ADDRESS.to_owned()
}

fn default_rpc_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_log_filename() -> String {
    DEFAULT_LOG_FILENAME.to_owned()
}

fn default_logs_path() -> String {
    DEFAULT_LOGS_PATH.to_owned()
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_owned()
}

fn default_bundle_count() -> u64 {
    DEFAULT_BUNDLE_COUNT
}

fn default_faucet_funds() -> u64 {
    DEFAULT_FAUCET_FUNDS
}

#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct RPCConfig {
    /// RPC bind address to listen for HTTP requests
    #[clap(long, default_value_t = default_rpc_bind_address())]
    #[serde(default = "default_rpc_bind_address")]
    pub rpc_bind_address: String,
    /// Number of workers to spawn for the HTTP server
    #[clap(long, default_value_t = default_rpc_threads())]
    #[serde(default = "default_rpc_threads")]
    pub rpc_threads: usize,
}

#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Domain used by test tooling when none is given
    #[clap(long, default_value_t = default_domain())]
    #[serde(default = "default_domain")]
    pub default_domain: String,
    /// Bundled transactions granted with the first address of an identity
    #[clap(long, default_value_t = default_bundle_count())]
    #[serde(default = "default_bundle_count")]
    pub initial_bundle_count: u64,
    /// Enable the devnet faucet endpoint
    #[clap(long)]
    #[serde(default)]
    pub enable_faucet: bool,
    /// Public key funded at startup, used to provision test identities
    #[clap(long)]
    #[serde(default)]
    pub faucet_public_key: Option<String>,
    /// Amount sent by the faucet when the request has none (smallest units)
    #[clap(long, default_value_t = default_faucet_funds())]
    #[serde(default = "default_faucet_funds")]
    pub faucet_funds: u64,
}

#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct LogConfig {
    /// Set log level
    #[clap(long, value_enum, default_value_t)]
    #[serde(default)]
    pub log_level: LogLevel,
    /// Set file log level
    /// By default, it will be the same as log level
    #[clap(long, value_enum)]
    pub file_log_level: Option<LogLevel>,
    /// Disable the log file
    #[clap(long)]
    #[serde(default)]
    pub disable_file_logging: bool,
    /// Disable the log filename date based
    /// If disabled, the log file will be named fio-daemon.log instead of YYYY-MM-DD.fio-daemon.log
    #[clap(long)]
    #[serde(default)]
    pub disable_file_log_date_based: bool,
    /// Disable the usage of colors in log
    #[clap(long)]
    #[serde(default)]
    pub disable_log_color: bool,
    /// Log filename
    ///
    /// By default filename is fio-daemon.log.
    /// File will be stored in logs directory, this is only the filename, not the full path.
    #[clap(long, default_value_t = default_log_filename())]
    #[serde(default = "default_log_filename")]
    pub filename_log: String,
    /// Logs directory
    ///
    /// By default it will be logs/ of the current directory.
    /// It must end with a / to be a valid folder.
    #[clap(long, default_value_t = default_logs_path())]
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    /// Module configuration for logs, written <module>=<level>
    #[clap(long)]
    #[serde(default)]
    pub logs_modules: Vec<ModuleConfig>,
    /// Change the datetime format used by the logger
    #[clap(long, default_value_t = default_logs_datetime_format())]
    #[serde(default = "default_logs_datetime_format")]
    pub datetime_format: String,
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[clap(
    version = VERSION,
    about = "FIO fee and bundle accounting node"
)]
#[command(styles = fio_common::get_cli_styles())]
pub struct Config {
    /// RPC configuration
    #[clap(flatten)]
    pub rpc: RPCConfig,
    /// Network configuration
    #[clap(flatten)]
    pub network: NetworkConfig,
    /// Log configuration
    #[clap(flatten)]
    pub log: LogConfig,
    /// JSON File to load the configuration from
    #[clap(long)]
    #[serde(skip)]
    #[serde(default)]
    pub config_file: Option<String>,
    /// Generate the template at the `config_file` path
    #[clap(long)]
    #[serde(skip)]
    #[serde(default)]
    pub generate_config_template: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_cli() {
        let config = Config::parse_from(["fio_daemon"]);
        assert_eq!(config.rpc.rpc_bind_address, DEFAULT_RPC_BIND_ADDRESS);
        assert_eq!(config.network.initial_bundle_count, DEFAULT_BUNDLE_COUNT);
        assert_eq!(config.network.default_domain, DEFAULT_DOMAIN);
        assert!(!config.network.enable_faucet);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "rpc": { "rpc_bind_address": "0.0.0.0:9000" },
            "network": { "enable_faucet": true },
            "log": { "log_level": "debug", "logs_modules": [{ "module": "actix_web", "level": "warn" }] }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.rpc.rpc_bind_address, "0.0.0.0:9000");
        assert!(config.network.enable_faucet);
        assert_eq!(config.network.faucet_funds, DEFAULT_FAUCET_FUNDS);
        assert_eq!(config.log.log_level, LogLevel::Debug);
        assert_eq!(config.log.logs_modules[0].level, LogLevel::Warn);
        assert_eq!(config.log.filename_log, DEFAULT_LOG_FILENAME);
    }
}
