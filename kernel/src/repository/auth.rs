use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    auth::{event::CreateToken, SessionToken},
    id::UserId,
};

#[mockall::automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    // セッショントークンからユーザー ID を引く。期限切れなら None
    async fn fetch_user_id_from_token(
        &self,
        session_token: &SessionToken,
    ) -> AppResult<Option<UserId>>;
    // ユーザー名とパスワードを照合する
    async fn verify_user(&self, username: &str, password: &str) -> AppResult<UserId>;
    async fn create_token(&self, event: CreateToken) -> AppResult<SessionToken>;
    async fn delete_token(&self, session_token: &SessionToken) -> AppResult<()>;
}
