use books_api::books::seed_books;
use books_api::{app, init_tracing, AppState};
use pagelink_core::{Pagination, PaginationConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = PaginationConfig::load("application.yaml")?;
    let state = AppState::new(Pagination::new(config), seed_books());

    let addr = std::env::var("BOOKS_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, page_size = config.page_size, "books-api listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
