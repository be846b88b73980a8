use serde::{Deserialize, Serialize};

use crate::query::QueryParams;

/// Pagination metadata and navigation links of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFields {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub first: String,
    /// Absent while the total is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    pub previous: String,
    pub next: String,
    pub query: QueryParams,
}

/// A paginated response: metadata plus the caller's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<R> {
    pub pagination: PageFields,
    pub result: R,
}

impl<R> Paginated<R> {
    /// Replace the payload, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Paginated<U> {
        Paginated {
            pagination: self.pagination,
            result: f(self.result),
        }
    }
}
