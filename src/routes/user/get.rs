use actix_web::{get, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::PublicUser;

/// Public user lookup; exposes id and username only.
#[get("/{user_id}")]
async fn get_user(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
) -> ApiResult<PublicUser> {
    let user_id: i64 = path
        .parse()
        .map_err(|_| AppError::Validation("invalid user id".to_string()))?;

    let record = db.get_user_by_id(user_id).await?;

    Ok(ApiResponse::Ok(PublicUser {
        id: record.id,
        username: record.username,
    }))
}
