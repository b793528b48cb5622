use actix_web::{web, App};
use std::sync::Arc;

use session_auth::{
    db::postgres_service::PostgresService, routes::configure_routes, utils::token::TokenIssuer,
};

use super::TEST_SECRET;

pub struct TestClient {
    pub db: Arc<PostgresService>,
    pub issuer: TokenIssuer,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient {
            db,
            issuer: TokenIssuer::new(TEST_SECRET),
        }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.issuer.clone()))
            .configure(configure_routes)
    }

    /// Registers a user and mints a ledger-backed session for it, bypassing
    /// the HTTP layer.
    #[allow(dead_code)]
    pub async fn create_session(&self, username: &str, password: &str) -> (i64, String) {
        let user_id = self
            .db
            .create_user(username, password)
            .await
            .expect("Failed to create user");

        let (token, expires_at) = self.issuer.issue(user_id).expect("Failed to issue token");
        let token_hash = self
            .issuer
            .ledger_hash(&token)
            .expect("Failed to hash token");
        self.db
            .insert_token(user_id, token_hash, expires_at)
            .await
            .expect("Failed to persist token");

        (user_id, token)
    }
}
