use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::TokenIssuer;

#[derive(Serialize, Deserialize)]
pub struct Response {}

/// Revocation is idempotent; logging out an already-revoked token is still a
/// 200.
#[post("")]
async fn logout(
    db: web::Data<Arc<PostgresService>>,
    issuer: web::Data<TokenIssuer>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let token_hash = issuer.ledger_hash(auth.token())?;
    db.revoke_token(&token_hash).await?;

    info!("logout processed for token hash {}...", &token_hash[..10]);

    Ok(ApiResponse::EmptyOk)
}
