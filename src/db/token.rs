use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use chrono::{DateTime, Utc};
use entity::active_token::{ActiveModel as TokenActive, Column, Entity as ActiveToken};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

/// Revocation ledger for issued tokens. This layer only ever sees keyed
/// hashes; callers compute them so the raw token string never reaches the
/// database.
impl PostgresService {
    pub async fn insert_token(
        &self,
        user_id: i64,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        ActiveToken::insert(TokenActive {
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
        })
        .exec(&self.db)
        .await?;
        Ok(())
    }

    /// Row with a matching hash whose expiry is strictly in the future.
    /// `None` covers never-issued, revoked and expired alike.
    pub async fn find_live_token(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        Ok(ActiveToken::find_by_id(token_hash.to_owned())
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await?
            .map(|row| row.user_id))
    }

    /// Idempotent: deleting zero rows is success.
    pub async fn revoke_token(&self, token_hash: &str) -> Result<(), AppError> {
        ActiveToken::delete_by_id(token_hash.to_owned())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn sweep_expired(&self) -> Result<u64, AppError> {
        let res = ActiveToken::delete_many()
            .filter(Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }
}
