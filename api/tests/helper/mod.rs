#![allow(dead_code)]

use std::sync::Arc;

use api::route::{auth, v1};
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use chrono::Utc;
use kernel::{
    model::{
        book::{Book, BookEntry, BookFormat, ReadingStatus},
        id::{BookId, UserId},
        user::User,
    },
    repository::{
        auth::{AuthRepository, MockAuthRepository},
        book::{BookRepository, MockBookRepository},
        health::{HealthCheckRepository, MockHealthCheckRepository},
        user::{MockUserRepository, UserRepository},
    },
};
use registry::{AppRegistry, MockAppRegistryExt};

pub const TEST_TOKEN: &str = "test-session-token";

pub fn v1(endpoint: &str) -> String {
    format!("/api/v1{endpoint}")
}

#[derive(Default)]
pub struct Mocks {
    pub auth: MockAuthRepository,
    pub user: MockUserRepository,
    pub book: MockBookRepository,
    pub health: MockHealthCheckRepository,
}

impl Mocks {
    // TEST_TOKEN を持つリクエストをログイン済みのユーザーとして通す
    pub fn signed_in(user_id: UserId) -> Self {
        let mut mocks = Self::default();
        mocks
            .auth
            .expect_fetch_user_id_from_token()
            .returning(move |token| Ok((token.0 == TEST_TOKEN).then_some(user_id)));
        mocks
            .user
            .expect_find_current_user()
            .returning(|id| Ok(Some(test_user(id))));
        mocks
    }

    pub fn into_router(self) -> Router {
        let auth: Arc<dyn AuthRepository> = Arc::new(self.auth);
        let user: Arc<dyn UserRepository> = Arc::new(self.user);
        let book: Arc<dyn BookRepository> = Arc::new(self.book);
        let health: Arc<dyn HealthCheckRepository> = Arc::new(self.health);

        let mut registry = MockAppRegistryExt::new();
        registry
            .expect_auth_repository()
            .returning(move || auth.clone());
        registry
            .expect_user_repository()
            .returning(move || user.clone());
        registry
            .expect_book_repository()
            .returning(move || book.clone());
        registry
            .expect_health_check_repository()
            .returning(move || health.clone());

        let registry: AppRegistry = Arc::new(registry);
        Router::new()
            .merge(v1::routes())
            .merge(auth::routes())
            .with_state(registry)
    }
}

pub fn test_user(id: UserId) -> User {
    User {
        id,
        username: "reader".into(),
        email: "reader@example.com".into(),
    }
}

pub fn dune_entry() -> BookEntry {
    BookEntry {
        title: "Dune".into(),
        author: "Frank Herbert".into(),
        pages: 412,
        pages_read: 0,
        status: ReadingStatus::WantToRead,
        price: 0.0,
        format: BookFormat::Print,
        suggested_by: String::new(),
    }
}

pub fn stored(book_id: BookId, entry: BookEntry) -> Book {
    let now = Utc::now();
    Book {
        id: book_id,
        entry,
        created_at: now,
        updated_at: now,
    }
}

pub fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(res: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
