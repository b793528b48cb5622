use std::env;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    /// Server-wide signing secret for session tokens. Injected into the
    /// issuer at startup; never read from anywhere else.
    pub jwt_secret: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        EnvConfig {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            db_url: Self::get_env("DATABASE_URL"),
            jwt_secret: Self::get_env("JWT_SECRET"),
        }
    }
}
