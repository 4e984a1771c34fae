use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::user::get_current_user;

pub fn build_user_routers() -> Router<AppRegistry> {
    Router::new().route("/users/me", get(get_current_user))
}
