use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use fio_common::{api::*, error::FioError};
use log::debug;

use super::FaucetConfig;
use crate::core::{chain::Chain, storage::Storage};

pub async fn get_fee<S: Storage>(
    chain: Data<Chain<S>>,
    params: Json<GetFeeParams>,
) -> Result<HttpResponse, FioError> {
    let fee = chain.get_fee(&params.end_point, &params.fio_address).await?;
    Ok(HttpResponse::Ok().json(GetFeeResult { fee }))
}

pub async fn get_fee_schedule<S: Storage>(chain: Data<Chain<S>>) -> HttpResponse {
    HttpResponse::Ok().json(chain.fee_schedule())
}

pub async fn get_fio_names<S: Storage>(
    chain: Data<Chain<S>>,
    params: Json<PublicKeyParams>,
) -> Result<HttpResponse, FioError> {
    let names = chain.get_fio_names(&params.fio_public_key).await?;
    Ok(HttpResponse::Ok().json(names))
}

pub async fn get_fio_balance<S: Storage>(
    chain: Data<Chain<S>>,
    params: Json<PublicKeyParams>,
) -> Result<HttpResponse, FioError> {
    let balance = chain.get_balance(&params.fio_public_key)?;
    Ok(HttpResponse::Ok().json(BalanceResult { balance }))
}

pub async fn get_account<S: Storage>(
    chain: Data<Chain<S>>,
    params: Json<PublicKeyParams>,
) -> Result<HttpResponse, FioError> {
    Ok(HttpResponse::Ok().json(chain.get_account(&params.fio_public_key)?))
}

pub async fn get_table_rows<S: Storage>(
    chain: Data<Chain<S>>,
    params: Json<GetTableRowsParams>,
) -> Result<HttpResponse, FioError> {
    Ok(HttpResponse::Ok().json(chain.get_table_rows(&params).await?))
}

pub async fn avail_check<S: Storage>(
    chain: Data<Chain<S>>,
    params: Json<AvailCheckParams>,
) -> Result<HttpResponse, FioError> {
    let registered = chain.avail_check(&params.fio_name).await?;
    Ok(HttpResponse::Ok().json(AvailCheckResult {
        is_registered: registered as u8,
    }))
}

pub async fn push_transaction<S: Storage>(
    chain: Data<Chain<S>>,
    request: Json<PushTransactionRequest>,
) -> Result<HttpResponse, FioError> {
    if log::log_enabled!(log::Level::Debug) {
        debug!("push_transaction {} from {}", request.action, request.actor);
    }

    match chain.push_transaction(&request).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            let err = e.into_fio_error();
            if log::log_enabled!(log::Level::Debug) {
                debug!("{} from {} rejected: {}", request.action, request.actor, err);
            }
            Err(err)
        }
    }
}

pub async fn faucet<S: Storage>(
    chain: Data<Chain<S>>,
    faucet: Data<FaucetConfig>,
    params: Json<FaucetParams>,
) -> Result<HttpResponse, FioError> {
    let amount = params.amount.unwrap_or(faucet.funds);
    let balance = chain.fund(&params.fio_public_key, amount)?;
    Ok(HttpResponse::Ok().json(BalanceResult { balance }))
}
