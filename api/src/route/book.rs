use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::book::{
    delete_book, register_book, show_book, show_book_list, show_shelf_summary, update_book,
};

pub fn build_book_routers() -> Router<AppRegistry> {
    let books_routers = Router::new()
        .route("/", get(show_book_list).post(register_book))
        .route("/summary", get(show_shelf_summary))
        .route(
            "/:book_id",
            get(show_book).patch(update_book).delete(delete_book),
        );

    Router::new().nest("/books", books_routers)
}
