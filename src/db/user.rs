use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::utils::token::{encrypt, verify};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl PostgresService {
    pub async fn username_taken(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .count(&self.db)
            .await?
            > 0)
    }

    /// Registration: hash the password and insert. The unique constraint on
    /// username backs up the pre-check under concurrent registration.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<i64, AppError> {
        if self.username_taken(username).await? {
            return Err(AppError::AlreadyExists);
        }

        let password_hash = encrypt(password)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

        let res = User::insert(UserActive {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .exec(&self.db)
        .await?;

        Ok(res.last_insert_id)
    }

    /// Login credential check. Unknown username and wrong password both come
    /// back as Unauthorized; callers must not be able to tell them apart.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<i64, AppError> {
        let user = User::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let matches = verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("stored password hash unreadable: {e}")))?;
        if !matches {
            return Err(AppError::Unauthorized);
        }

        Ok(user.id)
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<UserModel, AppError> {
        User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
