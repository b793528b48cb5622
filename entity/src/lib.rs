pub mod active_token;
pub mod user;
