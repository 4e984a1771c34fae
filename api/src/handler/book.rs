use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::{
    book::{
        event::{CreateBook, DeleteBook, UpdateBook},
        progress, ShelfSummary,
    },
    id::BookId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::book::{
        BookResponse, BookUpdate, CreateBookRequest, ShelfSummaryResponse, UpdateBookRequest,
    },
};

fn book_not_found(book_id: BookId) -> AppError {
    AppError::EntityNotFound(format!("Book {book_id} not found"))
}

pub async fn register_book(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateBookRequest>, AppError>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let entry = progress::initialize(req.into())?;
    entry.validate(&())?;

    let book = registry
        .book_repository()
        .create(CreateBook::new(entry))
        .await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

pub async fn show_book_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookResponse>>> {
    registry
        .book_repository()
        .find_all()
        .await
        .map(|books| books.into_iter().map(BookResponse::from).collect())
        .map(Json)
}

pub async fn show_shelf_summary(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ShelfSummaryResponse>> {
    let books = registry.book_repository().find_all().await?;
    Ok(Json(ShelfSummary::from_books(&books).into()))
}

pub async fn show_book(
    _user: AuthorizedUser,
    WithRejection(Path(book_id), _): WithRejection<Path<BookId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookResponse>> {
    registry
        .book_repository()
        .find_by_id(book_id)
        .await?
        .map(BookResponse::from)
        .map(Json)
        .ok_or_else(|| book_not_found(book_id))
}

// pagesRead を含むリクエストは進捗更新、それ以外は許可されたフィールドの更新として扱う
pub async fn update_book(
    _user: AuthorizedUser,
    WithRejection(Path(book_id), _): WithRejection<Path<BookId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateBookRequest>, AppError>,
) -> AppResult<Json<BookResponse>> {
    let update = BookUpdate::try_from(req)?;

    let mut book = registry
        .book_repository()
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| book_not_found(book_id))?;

    match update {
        BookUpdate::Progress(pages_read) => progress::apply_progress(&mut book.entry, pages_read),
        BookUpdate::Fields(fields) => progress::apply_field_update(&mut book.entry, fields),
    }
    book.entry.validate(&())?;

    let updated = registry
        .book_repository()
        .update(UpdateBook::new(book_id, book.entry))
        .await?;
    Ok(Json(updated.into()))
}

pub async fn delete_book(
    _user: AuthorizedUser,
    WithRejection(Path(book_id), _): WithRejection<Path<BookId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .book_repository()
        .delete(DeleteBook::new(book_id))
        .await
        .map(|_| StatusCode::OK)
}
