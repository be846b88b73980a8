use axum::body::Body;
use axum::Router;
use books_api::books::{seed_books, Book};
use books_api::{app, AppState};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use pagelink_core::{Paginated, Pagination, PaginationConfig};
use tower::util::ServiceExt;

fn test_app(page_size: u64) -> Router {
    let pagination = Pagination::new(PaginationConfig::new(page_size));
    app(AppState::new(pagination, seed_books()))
}

async fn get_json(router: Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let resp = router
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn result_ids(body: &serde_json::Value) -> Vec<u64> {
    body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_filtered_second_page() {
    let (status, body) = get_json(
        test_app(30),
        "/books?author=jk&page=2&page_size=5",
        &[("host", "api.example.com")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let pagination = &body["pagination"];
    assert_eq!(pagination["page"], 2);
    assert_eq!(pagination["page_size"], 5);
    assert_eq!(pagination["total"], 15);
    assert_eq!(pagination["first"], "http://api.example.com/books?author=jk&page=1&page_size=5");
    assert_eq!(pagination["last"], "http://api.example.com/books?author=jk&page=3&page_size=5");
    assert_eq!(pagination["previous"], "http://api.example.com/books?author=jk&page=1&page_size=5");
    assert_eq!(pagination["next"], "http://api.example.com/books?author=jk&page=3&page_size=5");
    assert_eq!(pagination["query"]["author"][0], "jk");
    assert_eq!(result_ids(&body), vec![5, 6, 7, 8, 9]);
}

#[tokio::test]
async fn test_configured_page_size_applies() {
    let (_, body) = get_json(test_app(5), "/books", &[("host", "api.example.com")]).await;

    let pagination = &body["pagination"];
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["page_size"], 5);
    assert_eq!(pagination["total"], 20);
    assert_eq!(pagination["last"], "http://api.example.com/books?page=4&page_size=5");
    assert_eq!(pagination["next"], "http://api.example.com/books?page=2&page_size=5");
    assert_eq!(result_ids(&body), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_forwarded_proto_is_kept() {
    let (_, body) = get_json(
        test_app(30),
        "/books?page=2&page_size=8",
        &[("host", "api.example.com"), ("x-forwarded-proto", "https")],
    )
    .await;

    assert_eq!(
        body["pagination"]["previous"],
        "https://api.example.com/books?page=1&page_size=8"
    );
    assert_eq!(result_ids(&body), (8..16).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_without_host_links_are_path_only() {
    let (_, body) = get_json(test_app(30), "/books?page=2&page_size=5", &[]).await;
    assert_eq!(body["pagination"]["first"], "/books?page=1&page_size=5");
}

#[tokio::test]
async fn test_page_past_the_end_is_clamped() {
    let (_, body) = get_json(
        test_app(30),
        "/books?author=tolkien&page=9&page_size=5",
        &[("host", "api.example.com")],
    )
    .await;

    let pagination = &body["pagination"];
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["next"], "http://api.example.com/books?author=tolkien&page=1&page_size=5");
    assert_eq!(result_ids(&body), vec![15, 16, 17, 18, 19]);
}

#[tokio::test]
async fn test_typed_envelope() {
    let resp = test_app(30)
        .oneshot(
            Request::builder()
                .uri("/books?page=4&page_size=6")
                .header("host", "api.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let page: Paginated<Vec<Book>> = serde_json::from_slice(&body).unwrap();

    assert_eq!(page.pagination.page, 4);
    assert_eq!(page.pagination.next, "http://api.example.com/books?page=4&page_size=6");
    assert_eq!(page.result.iter().map(|b| b.id).collect::<Vec<_>>(), vec![18, 19]);
    assert_eq!(page.result[0].name, "book 18");
}
