use actix_web::{get, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::PublicUser;
use crate::utils::webutils::CurrentUser;

/// Profile of whoever the validated bearer token belongs to. The user id
/// comes from the middleware via request extensions, never from the client.
#[get("")]
async fn profile(
    db: web::Data<Arc<PostgresService>>,
    user: web::ReqData<CurrentUser>,
) -> ApiResult<PublicUser> {
    let record = db.get_user_by_id(user.0).await?;

    Ok(ApiResponse::Ok(PublicUser {
        id: record.id,
        username: record.username,
    }))
}
