//! Reconciliation of `pages`, `pages_read` and `status`.
//!
//! `finished` is derived by [`BookEntry::finished`], so it holds after any
//! mutation. What differs between the two update paths is whether reaching
//! the end of the book moves the status to `Read`:
//!
//! * [`apply_progress`] forces `Read` once the book is finished.
//! * [`apply_field_update`] keeps whatever status the caller supplied.

use shared::error::AppResult;

use super::{
    draft::{
        coerce_amount, coerce_count, parse_format, parse_status, BookDraft, BookFieldUpdate,
        RawNumber,
    },
    BookEntry, ReadingStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusPolicy {
    CompleteOnFinish,
    Preserve,
}

/// Builds a new entry from a partial payload. Missing or blank text takes
/// its default and numbers that cannot be read count as 0. Only a status or
/// format naming no known value is an error.
pub fn initialize(draft: BookDraft) -> AppResult<BookEntry> {
    let status = match non_blank(draft.status) {
        Some(raw) => parse_status(&raw)?,
        None => ReadingStatus::default(),
    };
    let format = match non_blank(draft.format) {
        Some(raw) => parse_format(&raw)?,
        None => Default::default(),
    };

    Ok(BookEntry {
        title: draft.title.unwrap_or_default(),
        author: draft.author.unwrap_or_default(),
        pages: coerce_count(draft.pages.as_ref()),
        pages_read: coerce_count(draft.pages_read.as_ref()),
        status,
        price: coerce_amount(draft.price.as_ref()),
        format,
        suggested_by: draft.suggested_by.unwrap_or_default(),
    })
}

pub fn apply_progress(entry: &mut BookEntry, pages_read: impl Into<RawNumber>) {
    entry.pages_read = coerce_count(Some(&pages_read.into()));
    settle(entry, StatusPolicy::CompleteOnFinish);
}

pub fn apply_field_update(entry: &mut BookEntry, update: BookFieldUpdate) {
    let BookFieldUpdate {
        title,
        author,
        pages,
        status,
        price,
        format,
        suggested_by,
    } = update;

    if let Some(title) = title {
        entry.title = title;
    }
    if let Some(author) = author {
        entry.author = author;
    }
    if let Some(pages) = pages {
        entry.pages = pages;
    }
    if let Some(status) = status {
        entry.status = status;
    }
    if let Some(price) = price {
        entry.price = price;
    }
    if let Some(format) = format {
        entry.format = format;
    }
    if let Some(suggested_by) = suggested_by {
        entry.suggested_by = suggested_by;
    }

    settle(entry, StatusPolicy::Preserve);
}

// 更新経路の最後に必ず通す
fn settle(entry: &mut BookEntry, policy: StatusPolicy) {
    entry.pages_read = entry.pages_read.max(0);
    if policy == StatusPolicy::CompleteOnFinish
        && entry.finished()
        && entry.status != ReadingStatus::Read
    {
        entry.status = ReadingStatus::Read;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
