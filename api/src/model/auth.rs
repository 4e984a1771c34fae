use garde::Validate;
use kernel::model::{id::UserId, user::event::CreateUser};
use serde::{Deserialize, Deserializer, Serialize};

// 前後の空白を除いた値を検証・保存・照合に使う
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[garde(length(chars, min = 1, max = 255))]
    pub username: String,
    #[serde(deserialize_with = "trimmed")]
    #[garde(email, length(chars, max = 255))]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

impl From<RegisterRequest> for CreateUser {
    fn from(value: RegisterRequest) -> Self {
        let RegisterRequest {
            username,
            email,
            password,
        } = value;
        CreateUser::new(username, email, password)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: UserId,
    pub access_token: String,
}
