use actix_web::{get, HttpResponse};

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().body("session-auth API v1.0")
}
