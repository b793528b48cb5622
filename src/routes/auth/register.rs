use actix_web::{post, web};
use log::info;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{CredentialsReq, RegisterRes};

#[post("")]
async fn register(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<CredentialsReq>,
) -> ApiResult<RegisterRes> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let user_id = db.create_user(&body.username, &body.password).await?;
    info!("registered user {} ({})", user_id, body.username);

    Ok(ApiResponse::Ok(RegisterRes { user_id }))
}
