use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    book::{
        event::{CreateBook, DeleteBook, UpdateBook},
        Book,
    },
    id::BookId,
};

#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    // ID を採番して保存する
    async fn create(&self, event: CreateBook) -> AppResult<Book>;
    // 登録日時の新しい順
    async fn find_all(&self) -> AppResult<Vec<Book>>;
    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>>;
    // 該当する蔵書がなければ EntityNotFound
    async fn update(&self, event: UpdateBook) -> AppResult<Book>;
    async fn delete(&self, event: DeleteBook) -> AppResult<()>;
}
