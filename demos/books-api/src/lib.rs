//! Demo service paginating an in-memory book list with `pagelink-core`.

pub mod books;
pub mod extract;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/books", get(books::list_books))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info,tower_http=debug`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();
}
