pub mod event;

// ログイン時に発行し、Redis 上でユーザー ID と紐づけるセッショントークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}
