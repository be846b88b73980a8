//! Page navigation arithmetic and link rewriting for paginated responses.
//!
//! Given a request link such as `api.example.com/books?author=jk&page=2&page_size=5`,
//! [`Pagination::wrap`] resolves the requested page, lets the caller set the
//! total and slice its data, then renders `first`/`last`/`previous`/`next`
//! links that keep every other query parameter.

pub mod config;
pub mod error;
pub mod navigator;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod truncate;

pub use config::{ConfigError, PaginationConfig};
pub use error::PaginationError;
pub use navigator::{clamp, div_ceil, Navigation, Navigator, OffsetRange, DEFAULT_PAGE_SIZE};
pub use pagination::{Pagination, Paginator};
pub use query::{parse_link, rewrite, try_parse_link, ParsedLink, QueryBundle, QueryParams};
pub use schema::{PageFields, Paginated};
pub use truncate::{truncate, Truncatable};

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use crate::{
        Navigator, OffsetRange, Paginated, Pagination, PaginationConfig, PaginationError,
        Paginator, QueryParams, Truncatable,
    };
}
