use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        user::{event::CreateUser, User},
    },
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

const DUPLICATE_USER: &str = "User with this email or username already exists";

// bcrypt は CPU を占有するので非同期ランタイムのワーカーでは実行しない
async fn hash_password(password: String) -> AppResult<String> {
    let hashed =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST)).await??;
    Ok(hashed)
}

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, username, email
                FROM users
                WHERE user_id = $1;
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_database)?;

        Ok(row.map(User::from))
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let CreateUser {
            username,
            email,
            password,
        } = event;
        let password_hash = hash_password(password).await?;
        let mut tx = self.db.begin().await?;

        let existing: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*)
                FROM users
                WHERE username = $1 OR email = $2;
            "#,
        )
        .bind(&username)
        .bind(&email)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_database)?;
        if existing > 0 {
            return Err(AppError::UnprocessableEntity(DUPLICATE_USER.into()));
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (user_id, username, email, password_hash)
                VALUES ($1, $2, $3, $4)
                RETURNING user_id, username, email;
            "#,
        )
        .bind(UserId::new())
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // 同時登録で一意制約に当たった場合も重複として扱う
            if e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::UnprocessableEntity(DUPLICATE_USER.into())
            } else {
                AppError::from_database(e)
            }
        })?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        tracing::info!(user_id = %row.user_id, "user registered");
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_password_verifies() -> anyhow::Result<()> {
        let hashed = hash_password("secret".into()).await?;
        assert_ne!(hashed, "secret");
        assert!(bcrypt::verify("secret", &hashed)?);
        assert!(!bcrypt::verify("wrong", &hashed)?);
        Ok(())
    }
}
