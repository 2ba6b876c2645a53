pub mod chain_api;

use crate::core::{chain::Chain, config::RPCConfig, error::BlockchainError, storage::Storage};
use actix_web::{
    dev::ServerHandle, error::JsonPayloadError, get, web, App, HttpRequest, HttpResponse,
    HttpServer, Responder,
};
use anyhow::Context;
use fio_common::{
    config,
    error::{ErrorKind, FioError},
    rpc::CHAIN_API_PREFIX,
};
use log::{info, warn};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;

pub type SharedDaemonRpcServer = Arc<DaemonRpcServer>;

/// Devnet faucet settings shared with the handlers
#[derive(Debug, Clone, Copy)]
pub struct FaucetConfig {
    pub enabled: bool,
    // Amount sent when a request gives none
    pub funds: u64,
}

pub struct DaemonRpcServer {
    handle: Mutex<Option<ServerHandle>>,
    local_addrs: Vec<SocketAddr>,
}

impl DaemonRpcServer {
    pub async fn new<S: Storage>(
        chain: Arc<Chain<S>>,
        config: RPCConfig,
        faucet: FaucetConfig,
    ) -> Result<SharedDaemonRpcServer, BlockchainError> {
        if config.rpc_bind_address.starts_with("0.0.0.0") {
            warn!("RPC server is bound to all interfaces, push_transaction has no authentication");
        }
        if faucet.enabled {
            warn!("Faucet endpoint is enabled, anyone can mint tokens");
        }

        if log::log_enabled!(log::Level::Info) {
            info!("Starting RPC server on {}", config.rpc_bind_address);
        }

        let builder = HttpServer::new(move || {
            let chain = Arc::clone(&chain);
            App::new().configure(move |cfg| configure_routes(cfg, chain, faucet))
        })
        .disable_signals()
        .bind(&config.rpc_bind_address)
        .with_context(|| format!("Failed to bind RPC server on {}", config.rpc_bind_address))?;

        let local_addrs = builder.addrs();
        let http_server = builder.workers(config.rpc_threads.max(1)).run();

        let server = Arc::new(Self {
            handle: Mutex::new(Some(http_server.handle())),
            local_addrs,
        });
        tokio::spawn(http_server);

        Ok(server)
    }

    /// Addresses the server is listening on
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    pub async fn stop(&self) {
        info!("Stopping RPC Server...");
        let mut handle = self.handle.lock().await;
        if let Some(handle) = handle.take() {
            handle.stop(false).await;
            info!("RPC Server is now stopped!");
        } else {
            warn!("RPC Server is not running!");
        }
    }
}

/// Register every route of the node on an actix app
pub fn configure_routes<S: Storage>(
    cfg: &mut web::ServiceConfig,
    chain: Arc<Chain<S>>,
    faucet: FaucetConfig,
) {
    let mut scope = web::scope(CHAIN_API_PREFIX)
        .route("/get_fee", web::post().to(chain_api::get_fee::<S>))
        .route("/get_fee_schedule", web::post().to(chain_api::get_fee_schedule::<S>))
        .route("/get_fio_names", web::post().to(chain_api::get_fio_names::<S>))
        .route("/get_fio_balance", web::post().to(chain_api::get_fio_balance::<S>))
        .route("/get_account", web::post().to(chain_api::get_account::<S>))
        .route("/get_table_rows", web::post().to(chain_api::get_table_rows::<S>))
        .route("/avail_check", web::post().to(chain_api::avail_check::<S>))
        .route("/push_transaction", web::post().to(chain_api::push_transaction::<S>));

    if faucet.enabled {
        scope = scope.route("/faucet", web::post().to(chain_api::faucet::<S>));
    }

    cfg.app_data(web::Data::from(chain))
        .app_data(web::Data::new(faucet))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(index)
        .service(scope);
}

// Malformed bodies are reported with the regular error envelope
fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    FioError::with_value(ErrorKind::ParseError, err.to_string()).into()
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body(format!("Running on: {}", config::VERSION))
}
