use actix_web::{post, web};
use log::info;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{CredentialsReq, LoginRes};
use crate::utils::token::TokenIssuer;

#[post("")]
async fn login(
    db: web::Data<Arc<PostgresService>>,
    issuer: web::Data<TokenIssuer>,
    body: web::Json<CredentialsReq>,
) -> ApiResult<LoginRes> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let user_id = db.verify_credentials(&body.username, &body.password).await?;

    let (token, expires_at) = issuer.issue(user_id)?;

    // Ledger insert happens before the response; the client never holds a
    // token that is not yet ledger-valid.
    let token_hash = issuer.ledger_hash(&token)?;
    db.insert_token(user_id, token_hash, expires_at).await?;

    info!("login successful for user {} ({})", user_id, body.username);

    Ok(ApiResponse::Ok(LoginRes {
        user_id,
        username: body.username.clone(),
        token,
    }))
}
