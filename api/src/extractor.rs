use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::SessionToken, id::UserId, user::User};
use registry::AppRegistry;
use shared::error::AppError;

// 認証済みのリクエストで handler に渡す構造体
pub struct AuthorizedUser {
    pub session_token: SessionToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // Authorization: Bearer <token> からセッショントークンを取り出す
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let session_token = SessionToken(bearer.token().to_string());

        // 期限切れ、またはログアウト済みのトークンは弾く
        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&session_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(Self {
            session_token,
            user,
        })
    }
}
