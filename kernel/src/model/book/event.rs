use derive_new::new;

use super::BookEntry;
use crate::model::id::BookId;

#[derive(Debug, new)]
pub struct CreateBook {
    pub entry: BookEntry,
}

#[derive(Debug, new)]
pub struct UpdateBook {
    pub book_id: BookId,
    pub entry: BookEntry,
}

#[derive(Debug, new)]
pub struct DeleteBook {
    pub book_id: BookId,
}
