use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    user::{event::CreateUser, User},
};

#[mockall::automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    // ユーザー名かメールアドレスが登録済みなら UnprocessableEntity
    async fn create(&self, event: CreateUser) -> AppResult<User>;
}
