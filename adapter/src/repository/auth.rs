use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        auth::{event::CreateToken, SessionToken},
        id::UserId,
    },
    repository::auth::AuthRepository,
};
use shared::error::{AppError, AppResult};

use crate::{
    database::{
        model::{
            auth::{AuthorizationKey, AuthorizedUserId},
            user::UserCredentialRow,
        },
        ConnectionPool,
    },
    redis::RedisClient,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        session_token: &SessionToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = session_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedUserId::into_inner))
    }

    async fn verify_user(&self, username: &str, password: &str) -> AppResult<UserId> {
        let credential = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE username = $1;
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_database)?
        .ok_or(AppError::UnauthenticatedError)?;

        if !bcrypt::verify(password, &credential.password_hash)? {
            tracing::debug!(%username, "password mismatch");
            return Err(AppError::UnauthenticatedError);
        }
        Ok(credential.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<SessionToken> {
        let key: AuthorizationKey = (&event.session_token).into();
        let value = AuthorizedUserId::new(event.user_id);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(event.session_token)
    }

    async fn delete_token(&self, session_token: &SessionToken) -> AppResult<()> {
        let key: AuthorizationKey = session_token.into();
        self.kv.delete(&key).await
    }
}
