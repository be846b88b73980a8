use std::sync::Arc;

use pagelink_core::Pagination;

use crate::books::Book;

#[derive(Clone)]
pub struct AppState {
    pub pagination: Pagination,
    pub books: Arc<Vec<Book>>,
}

impl AppState {
    pub fn new(pagination: Pagination, books: Vec<Book>) -> Self {
        Self {
            pagination,
            books: Arc::new(books),
        }
    }
}
