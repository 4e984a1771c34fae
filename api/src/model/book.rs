use chrono::{DateTime, Utc};
use kernel::model::{
    book::{
        draft::{parse_format, parse_status, BookDraft, BookFieldUpdate, RawNumber},
        Book, ShelfSummary,
    },
    id::BookId,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

// 数値フィールドは数値でも文字列でも受け付ける
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<RawNumber>,
    pub pages_read: Option<RawNumber>,
    pub status: Option<String>,
    pub price: Option<RawNumber>,
    pub format: Option<String>,
    pub suggested_by: Option<String>,
}

impl From<CreateBookRequest> for BookDraft {
    fn from(value: CreateBookRequest) -> Self {
        let CreateBookRequest {
            title,
            author,
            pages,
            pages_read,
            status,
            price,
            format,
            suggested_by,
        } = value;
        BookDraft {
            title,
            author,
            pages,
            pages_read,
            status,
            price,
            format,
            suggested_by,
        }
    }
}

/// PATCH body. When `pagesRead` is present the request is a progress update
/// and every other field is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub pages_read: Option<RawNumber>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<RawNumber>,
    pub status: Option<String>,
    pub price: Option<RawNumber>,
    pub format: Option<String>,
    pub suggested_by: Option<String>,
}

#[derive(Debug)]
pub enum BookUpdate {
    Progress(RawNumber),
    Fields(BookFieldUpdate),
}

impl TryFrom<UpdateBookRequest> for BookUpdate {
    type Error = AppError;

    fn try_from(value: UpdateBookRequest) -> AppResult<Self> {
        let UpdateBookRequest {
            pages_read,
            title,
            author,
            pages,
            status,
            price,
            format,
            suggested_by,
        } = value;

        if let Some(pages_read) = pages_read {
            return Ok(BookUpdate::Progress(pages_read));
        }

        let pages = pages
            .map(|raw| {
                raw.to_count()
                    .ok_or_else(|| AppError::InvalidValue("`pages` must be a whole number".into()))
            })
            .transpose()?;
        let price = price
            .map(|raw| {
                raw.parse()
                    .ok_or_else(|| AppError::InvalidValue("`price` must be a number".into()))
            })
            .transpose()?;

        Ok(BookUpdate::Fields(BookFieldUpdate {
            title,
            author,
            pages,
            status: status.as_deref().map(parse_status).transpose()?,
            price,
            format: format.as_deref().map(parse_format).transpose()?,
            suggested_by,
        }))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub pages: i32,
    pub pages_read: i32,
    pub status: String,
    pub price: f64,
    pub format: String,
    pub suggested_by: String,
    pub finished: bool,
    pub percent_read: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        let Book {
            id,
            entry,
            created_at,
            updated_at,
        } = value;
        let finished = entry.finished();
        let percent_read = entry.percent_read();
        Self {
            id,
            title: entry.title,
            author: entry.author,
            pages: entry.pages,
            pages_read: entry.pages_read,
            status: entry.status.to_string(),
            price: entry.price,
            format: entry.format.to_string(),
            suggested_by: entry.suggested_by,
            finished,
            percent_read,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfSummaryResponse {
    pub total_books: usize,
    pub finished_books: usize,
    pub total_pages_read: i64,
}

impl From<ShelfSummary> for ShelfSummaryResponse {
    fn from(value: ShelfSummary) -> Self {
        let ShelfSummary {
            total_books,
            finished_books,
            total_pages_read,
        } = value;
        Self {
            total_books,
            finished_books,
            total_pages_read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::book::{BookFormat, ReadingStatus};

    #[test]
    fn pages_read_selects_progress_path() {
        let req = UpdateBookRequest {
            pages_read: Some(50.into()),
            status: Some("not even valid".into()),
            ..Default::default()
        };
        let update = BookUpdate::try_from(req).unwrap();
        assert!(matches!(update, BookUpdate::Progress(RawNumber::Number(n)) if n == 50.0));
    }

    #[test]
    fn field_path_parses_allowed_fields() {
        let req = UpdateBookRequest {
            pages: Some("320".into()),
            price: Some(12.5.into()),
            status: Some("Currently reading".into()),
            format: Some("PDF".into()),
            ..Default::default()
        };
        let BookUpdate::Fields(fields) = BookUpdate::try_from(req).unwrap() else {
            panic!("expected a field update");
        };
        assert_eq!(fields.pages, Some(320));
        assert_eq!(fields.price, Some(12.5));
        assert_eq!(fields.status, Some(ReadingStatus::CurrentlyReading));
        assert_eq!(fields.format, Some(BookFormat::Pdf));
        assert_eq!(fields.title, None);
    }

    #[test]
    fn field_path_rejects_non_numeric_pages() {
        let req = UpdateBookRequest {
            pages: Some("many".into()),
            ..Default::default()
        };
        assert!(matches!(
            BookUpdate::try_from(req),
            Err(AppError::InvalidValue(_))
        ));
    }

    #[test]
    fn field_path_rejects_unknown_format() {
        let req = UpdateBookRequest {
            format: Some("Hardcover".into()),
            ..Default::default()
        };
        assert!(matches!(
            BookUpdate::try_from(req),
            Err(AppError::InvalidValue(_))
        ));
    }
}
