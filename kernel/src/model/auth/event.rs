use crate::model::{auth::SessionToken, id::UserId};

#[derive(Debug)]
pub struct CreateToken {
    pub user_id: UserId,
    pub session_token: SessionToken,
}

impl CreateToken {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            session_token: SessionToken::generate(),
        }
    }
}
