pub mod auth;
pub mod book;
pub mod id;
pub mod user;
