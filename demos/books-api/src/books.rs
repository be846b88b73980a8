use axum::extract::{Query, State};
use axum::Json;
use pagelink_core::Paginated;
use serde::{Deserialize, Serialize};

use crate::extract::RequestLink;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub author: String,
    pub name: String,
}

/// Twenty books: ids 0..15 by `jk`, ids 15..20 by `tolkien`.
pub fn seed_books() -> Vec<Book> {
    (0..20)
        .map(|id| Book {
            id,
            author: if id < 15 { "jk" } else { "tolkien" }.to_string(),
            name: format!("book {id}"),
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct BookFilter {
    pub author: Option<String>,
}

pub async fn list_books(
    State(state): State<AppState>,
    RequestLink(link): RequestLink,
    Query(filter): Query<BookFilter>,
) -> Json<Paginated<Vec<Book>>> {
    let matching: Vec<Book> = state
        .books
        .iter()
        .filter(|book| filter.author.as_ref().map_or(true, |a| &book.author == a))
        .cloned()
        .collect();

    let paginated = state.pagination.wrap(&link, |p| {
        if let Err(err) = p.set_total(matching.len() as i64) {
            tracing::warn!(error = %err, "rejected total");
        }
        p.wrap_with_truncate(matching)
    });

    tracing::info!(
        link = %link,
        page = paginated.pagination.page,
        returned = paginated.result.len(),
        "listed books"
    );
    Json(paginated)
}
