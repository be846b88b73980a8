use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The absolute link a client used to reach the current request.
///
/// The scheme comes from `X-Forwarded-Proto` and defaults to `http`. Without
/// a `Host` header the link is just the path and query.
///
/// Both headers are copied into the rendered links unchecked, so the service
/// must sit behind a reverse proxy that sets or overwrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLink(pub String);

impl<S> FromRequestParts<S> for RequestLink
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestLink(request_link(parts)))
    }
}

fn request_link(parts: &Parts) -> String {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let host = header_str(parts, HOST.as_str()).or_else(|| parts.uri.authority().map(|a| a.as_str()));
    let Some(host) = host else {
        return path_and_query.to_string();
    };

    let scheme = header_str(parts, FORWARDED_PROTO)
        .or_else(|| parts.uri.scheme_str())
        .unwrap_or("http");
    format!("{scheme}://{host}{path_and_query}")
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}
