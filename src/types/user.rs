use serde::{Deserialize, Serialize};

/// Body of both register and login requests.
#[derive(Serialize, Deserialize)]
pub struct CredentialsReq {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterRes {
    pub user_id: i64,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRes {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

/// Public view of a user. No password hash, ever.
#[derive(Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
}
