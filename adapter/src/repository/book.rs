use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        book::{
            event::{CreateBook, DeleteBook, UpdateBook},
            Book,
        },
        id::BookId,
    },
    repository::book::BookRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::book::BookRow, ConnectionPool};

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn create(&self, event: CreateBook) -> AppResult<Book> {
        let CreateBook { entry } = event;
        let row = sqlx::query_as::<_, BookRow>(
            r#"
                INSERT INTO books (
                    book_id, title, author, pages, pages_read,
                    status, price, format, suggested_by, finished
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING
                    book_id, title, author, pages, pages_read,
                    status, price, format, suggested_by,
                    created_at, updated_at;
            "#,
        )
        .bind(BookId::new())
        .bind(&entry.title)
        .bind(&entry.author)
        .bind(entry.pages)
        .bind(entry.pages_read)
        .bind(entry.status.as_ref())
        .bind(entry.price)
        .bind(entry.format.as_ref())
        .bind(&entry.suggested_by)
        .bind(entry.finished())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::from_database)?;

        tracing::info!(book_id = %row.book_id, "book created");
        row.try_into()
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
                SELECT
                    book_id, title, author, pages, pages_read,
                    status, price, format, suggested_by,
                    created_at, updated_at
                FROM books
                ORDER BY created_at DESC;
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_database)?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
                SELECT
                    book_id, title, author, pages, pages_read,
                    status, price, format, suggested_by,
                    created_at, updated_at
                FROM books
                WHERE book_id = $1;
            "#,
        )
        .bind(book_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_database)?;

        row.map(Book::try_from).transpose()
    }

    // 行全体を書き戻すので、同じ蔵書への同時更新は後勝ちになる
    async fn update(&self, event: UpdateBook) -> AppResult<Book> {
        let UpdateBook { book_id, entry } = event;
        let row = sqlx::query_as::<_, BookRow>(
            r#"
                UPDATE books
                SET
                    title = $1,
                    author = $2,
                    pages = $3,
                    pages_read = $4,
                    status = $5,
                    price = $6,
                    format = $7,
                    suggested_by = $8,
                    finished = $9,
                    updated_at = CURRENT_TIMESTAMP(3)
                WHERE book_id = $10
                RETURNING
                    book_id, title, author, pages, pages_read,
                    status, price, format, suggested_by,
                    created_at, updated_at;
            "#,
        )
        .bind(&entry.title)
        .bind(&entry.author)
        .bind(entry.pages)
        .bind(entry.pages_read)
        .bind(entry.status.as_ref())
        .bind(entry.price)
        .bind(entry.format.as_ref())
        .bind(&entry.suggested_by)
        .bind(entry.finished())
        .bind(book_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_database)?
        .ok_or_else(|| AppError::EntityNotFound(format!("Book {book_id} not found")))?;

        row.try_into()
    }

    async fn delete(&self, event: DeleteBook) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM books
                WHERE book_id = $1;
            "#,
        )
        .bind(event.book_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::from_database)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Book {} not found",
                event.book_id
            )));
        }
        tracing::info!(book_id = %event.book_id, "book deleted");
        Ok(())
    }
}
