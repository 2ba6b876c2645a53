use anyhow::{Context, Result};
use clap::Parser;
use fio_common::{
    account::PublicKey, config::VERSION, logging::setup_logger, names::validate_fio_domain,
    utils::format_fio,
};
use fio_daemon::{
    core::{chain::Chain, config::Config, storage::MemoryStorage},
    rpc::{DaemonRpcServer, FaucetConfig},
};
use log::{error, info};
use std::{fs::File, io::Write, path::Path, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config: Config = Config::parse();
    if let Some(path) = config.config_file.as_ref() {
        if config.generate_config_template {
            if Path::new(path).exists() {
                eprintln!("Config file already exists at {}", path);
                return Ok(());
            }

            let mut file = File::create(path).context("Error while creating config file")?;
            let json = serde_json::to_string_pretty(&config)
                .context("Error while serializing config file")?;
            file.write_all(json.as_bytes())
                .context("Error while writing config file")?;
            println!("Config file template generated at {}", path);
            return Ok(());
        }

        let file = File::open(path).context("Error while opening config file")?;
        config = serde_json::from_reader(file).context("Error while reading config file")?;
    } else if config.generate_config_template {
        eprintln!(
            "Provided config file path is required to generate the template with --config-file"
        );
        return Ok(());
    }

    let log_config = &config.log;
    setup_logger(
        log_config.log_level,
        log_config.file_log_level.unwrap_or(log_config.log_level),
        log_config.disable_file_logging,
        log_config.disable_file_log_date_based,
        log_config.disable_log_color,
        &log_config.filename_log,
        &log_config.logs_path,
        &log_config.logs_modules,
        &log_config.datetime_format,
    )
    .context("Error while setting up the logger")?;

    info!("FIO Daemon v{}", VERSION);

    let network = &config.network;
    let faucet_key = network
        .faucet_public_key
        .as_deref()
        .map(PublicKey::parse)
        .transpose()
        .context("Invalid faucet public key")?;

    let mut storage = MemoryStorage::new();
    if let Some(key) = faucet_key.as_ref() {
        // Test identities register their addresses on the default domain
        let domain = validate_fio_domain(&network.default_domain)
            .context("Invalid default domain")?;
        info!("Default domain {} owned by the faucet key", domain);
        storage = storage.with_domain(&domain, key, true);
    }

    let chain = Arc::new(Chain::new(storage, network.initial_bundle_count));
    if let Some(key) = faucet_key.as_ref() {
        let balance = chain
            .fund(key.as_str(), network.faucet_funds)
            .context("Error while funding the faucet key")?;
        info!("Faucet key {} funded with {} FIO", key, format_fio(balance));
    }

    let faucet = FaucetConfig {
        enabled: network.enable_faucet,
        funds: network.faucet_funds,
    };
    let server = DaemonRpcServer::new(chain, config.rpc.clone(), faucet)
        .await
        .context("Error while starting the RPC server")?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Error while waiting for shutdown signal: {}", e);
    }
    server.stop().await;

    Ok(())
}
