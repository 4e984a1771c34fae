use chrono::{DateTime, Utc};
use kernel::model::{
    book::{Book, BookEntry},
    id::BookId,
};
use shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
pub struct BookRow {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub pages: i32,
    pub pages_read: i32,
    pub status: String,
    pub price: f64,
    pub format: String,
    pub suggested_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = AppError;

    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        let BookRow {
            book_id,
            title,
            author,
            pages,
            pages_read,
            status,
            price,
            format,
            suggested_by,
            created_at,
            updated_at,
        } = value;
        let status = status.parse().map_err(|_| {
            AppError::ConversionEntityError(format!("unknown status `{status}` for book {book_id}"))
        })?;
        let format = format.parse().map_err(|_| {
            AppError::ConversionEntityError(format!("unknown format `{format}` for book {book_id}"))
        })?;
        Ok(Book {
            id: book_id,
            entry: BookEntry {
                title,
                author,
                pages,
                pages_read,
                status,
                price,
                format,
                suggested_by,
            },
            created_at,
            updated_at,
        })
    }
}
