use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::utils::webutils::bearer_guard;

pub mod auth;
pub mod index;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let bearer = HttpAuthentication::bearer(bearer_guard);

    cfg.service(index::index);
    cfg.service(
        web::scope("/auth")
            .service(web::scope("/register").service(auth::register::register))
            .service(web::scope("/login").service(auth::login::login))
            .service(
                web::scope("/logout")
                    .service(auth::logout::logout)
                    .wrap(bearer.clone()),
            ),
    );
    cfg.service(
        web::scope("/users")
            // registered before the `/{user_id}` route so it wins the match
            .service(
                web::scope("/profile")
                    .service(user::profile::profile)
                    .wrap(bearer),
            )
            .service(user::get::get_user),
    );
}
