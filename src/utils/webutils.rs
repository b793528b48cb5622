use actix_web::{dev::ServiceRequest, web, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use log::debug;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::utils::token::{validate_token, TokenIssuer};

/// User id resolved by the bearer middleware, scoped to the one request it
/// was inserted for. Handlers read it through `web::ReqData<CurrentUser>`.
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser(pub i64);

/// Bearer validator for `HttpAuthentication::bearer`. The extractor has
/// already rejected missing or malformed Authorization headers by the time
/// this runs, so only the token itself is checked here. The downstream
/// handler is never reached on failure.
pub async fn bearer_guard(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let db = match req.app_data::<web::Data<Arc<PostgresService>>>() {
        Some(db) => Arc::clone(db.get_ref()),
        None => {
            return Err((
                AppError::Internal("database handle missing from app data".to_string()).into(),
                req,
            ))
        }
    };
    let issuer = match req.app_data::<web::Data<TokenIssuer>>() {
        Some(issuer) => issuer.get_ref().clone(),
        None => {
            return Err((
                AppError::Internal("token issuer missing from app data".to_string()).into(),
                req,
            ))
        }
    };

    match validate_token(&db, &issuer, credentials.token()).await {
        Ok(user_id) => {
            req.extensions_mut().insert(CurrentUser(user_id));
            Ok(req)
        }
        Err(e) => {
            debug!("rejected bearer token: {}", e);
            Err((AppError::Unauthorized.into(), req))
        }
    }
}
