use actix_web::{web, App, HttpServer};
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

use session_auth::config::EnvConfig;
use session_auth::db::postgres_service::PostgresService;
use session_auth::routes::configure_routes;
use session_auth::utils::token::TokenIssuer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let db = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .expect("Failed to initialize PostgresService"),
    );
    let issuer = TokenIssuer::new(&config.jwt_secret);

    // hourly sweep of expired ledger rows; lookups re-check expiry on their
    // own, so this only keeps the table small
    {
        let db = Arc::clone(&db);
        actix_web::rt::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(3600));
            loop {
                tick.tick().await;
                match db.sweep_expired().await {
                    Ok(0) => {}
                    Ok(n) => info!("swept {} expired tokens", n),
                    Err(e) => error!("token sweep failed: {}", e),
                }
            }
        });
    }

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(web::Data::new(issuer.clone()))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
