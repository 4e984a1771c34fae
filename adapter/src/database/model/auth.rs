use std::str::FromStr;

use kernel::model::{auth::SessionToken, id::UserId};
use shared::error::AppError;

use crate::redis::model::{RedisKey, RedisValue};

// Redis 上のキーは "session:<token>" の形式
pub struct AuthorizationKey(String);

#[derive(Debug, PartialEq, Eq)]
pub struct AuthorizedUserId(UserId);

impl From<&SessionToken> for AuthorizationKey {
    fn from(value: &SessionToken) -> Self {
        Self(format!("session:{}", value.0))
    }
}

impl AuthorizedUserId {
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.clone()
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from_str(&s)?))
    }
}
