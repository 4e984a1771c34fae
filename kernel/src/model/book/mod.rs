use chrono::{DateTime, Utc};
use garde::Validate;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::id::BookId;

pub mod draft;
pub mod event;
pub mod progress;

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub entry: BookEntry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 蔵書 1 冊分の読書記録。ID とタイムスタンプ以外のフィールドをまとめる。
// finished は pages と pages_read から導出されるため、フィールドとしては持たない。
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BookEntry {
    #[garde(length(chars, min = 1, max = 255))]
    pub title: String,
    #[garde(length(chars, max = 255))]
    pub author: String,
    #[garde(range(min = 1))]
    pub pages: i32,
    #[garde(range(min = 0))]
    pub pages_read: i32,
    #[garde(skip)]
    pub status: ReadingStatus,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(skip)]
    pub format: BookFormat,
    #[garde(length(chars, max = 255))]
    pub suggested_by: String,
}

impl BookEntry {
    pub fn finished(&self) -> bool {
        self.pages > 0 && self.pages_read >= self.pages
    }

    /// Share of the book already read, rounded to the nearest percent.
    /// Not capped at 100 since `pages_read` may exceed `pages`.
    pub fn percent_read(&self) -> i64 {
        if self.pages <= 0 {
            return 0;
        }
        (f64::from(self.pages_read) / f64::from(self.pages) * 100.0).round() as i64
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, AsRefStr, Display, EnumIter,
)]
pub enum ReadingStatus {
    Read,
    #[strum(serialize = "Re-read")]
    ReRead,
    #[strum(serialize = "DNF")]
    DidNotFinish,
    #[strum(serialize = "Currently reading")]
    CurrentlyReading,
    #[strum(serialize = "Returned Unread")]
    ReturnedUnread,
    #[default]
    #[strum(serialize = "Want to read")]
    WantToRead,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, AsRefStr, Display, EnumIter,
)]
pub enum BookFormat {
    #[default]
    Print,
    #[strum(serialize = "PDF")]
    Pdf,
    Ebook,
    #[strum(serialize = "AudioBook")]
    AudioBook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfSummary {
    pub total_books: usize,
    pub finished_books: usize,
    pub total_pages_read: i64,
}

impl ShelfSummary {
    pub fn from_books(books: &[Book]) -> Self {
        Self {
            total_books: books.len(),
            finished_books: books.iter().filter(|b| b.entry.finished()).count(),
            total_pages_read: books.iter().map(|b| i64::from(b.entry.pages_read)).sum(),
        }
    }
}
