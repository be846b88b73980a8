use crate::config::PaginationConfig;
use crate::error::PaginationError;
use crate::navigator::{Navigation, Navigator, OffsetRange};
use crate::query::{self, QueryBundle, QueryParams, PAGE_KEY, PAGE_SIZE_KEY};
use crate::schema::{PageFields, Paginated};
use crate::truncate::{truncate, Truncatable};

/// Wraps paginated payloads with navigation metadata.
///
/// A `Pagination` only holds configuration; every call to [`wrap`] builds
/// its own navigator and query copies, so one instance can be shared across
/// requests.
///
/// ```
/// use pagelink_core::Pagination;
///
/// let books: Vec<u32> = (0..20).collect();
/// let page = Pagination::default().wrap(
///     "api.example.com/books?author=jk&page=2&page_size=5",
///     |p| {
///         p.set_total(20).unwrap();
///         p.wrap_with_truncate(books)
///     },
/// );
///
/// assert_eq!(page.result, vec![5, 6, 7, 8, 9]);
/// assert_eq!(
///     page.pagination.next,
///     "api.example.com/books?author=jk&page=3&page_size=5"
/// );
/// ```
///
/// [`wrap`]: Pagination::wrap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    config: PaginationConfig,
}

impl Pagination {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> PaginationConfig {
        self.config
    }

    /// Build the paginator for `link` without running anything.
    ///
    /// A malformed link is absorbed: the paginator starts from an empty base
    /// path with page 1 and the default page size.
    pub fn paginator(&self, link: &str) -> Paginator {
        let parsed = query::parse_link(link, self.config.page_size);
        let navigator =
            Navigator::with_default_page_size(parsed.page, parsed.page_size, self.config.page_size);

        Paginator {
            base_path: parsed.base_path,
            queries: parsed.queries,
            navigator,
            has_page: parsed.has_page,
            has_page_size: parsed.has_page_size,
        }
    }

    /// Run `run` against the paginator for `link` and wrap its result.
    ///
    /// The callback usually sets the total and either slices its own data
    /// with [`Paginator::pagination_range`] or hands the full sequence to
    /// [`Paginator::wrap_with_truncate`].
    pub fn wrap<R>(&self, link: &str, run: impl FnOnce(&mut Paginator) -> R) -> Paginated<R> {
        let mut paginator = self.paginator(link);
        let result = run(&mut paginator);
        paginator.finish(result)
    }

    /// Prepare a wrapper for `link` whose payload is supplied later.
    ///
    /// `configure` runs when the returned closure is called, right before the
    /// links are rendered.
    pub fn wrapper<R>(
        &self,
        link: &str,
        configure: impl FnOnce(&mut Paginator),
    ) -> impl FnOnce(R) -> Paginated<R> {
        let mut paginator = self.paginator(link);
        move |result| {
            configure(&mut paginator);
            paginator.finish(result)
        }
    }
}

/// Per-request handle given to the [`Pagination::wrap`] callback.
#[derive(Debug, Clone)]
pub struct Paginator {
    base_path: String,
    queries: QueryBundle,
    navigator: Navigator,
    has_page: bool,
    has_page_size: bool,
}

impl Paginator {
    /// Return `items` untouched, for payloads already sliced by the caller.
    pub fn wrap<T>(&self, items: T) -> T {
        items
    }

    /// Slice `items` to the current page, bounded by the sequence length.
    pub fn wrap_with_truncate<T: Truncatable>(&self, items: T) -> T {
        truncate(items, self.pagination_range().to_range())
    }

    /// Offset range of the current page.
    pub fn pagination_range(&self) -> OffsetRange {
        self.navigator.offset_range()
    }

    /// `(page, page_size, total)`.
    pub fn indicator(&self) -> (u64, u64, u64) {
        self.navigator.indicator()
    }

    pub fn set_indicator(
        &mut self,
        page: i64,
        page_size: i64,
        total: i64,
    ) -> Result<(), PaginationError> {
        self.navigator.set_indicator(page, page_size, total)
    }

    pub fn set_total(&mut self, total: i64) -> Result<(), PaginationError> {
        self.navigator.set_total(total)
    }

    pub fn set_page_size(&mut self, page_size: i64) -> Result<(), PaginationError> {
        self.navigator.set_page_size(page_size)
    }

    pub fn navigation(&self) -> Navigation {
        self.navigator.navigation()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Whether the link carried a non-empty `page` parameter.
    pub fn has_page(&self) -> bool {
        self.has_page
    }

    /// Whether the link carried a non-empty `page_size` parameter.
    pub fn has_page_size(&self) -> bool {
        self.has_page_size
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The request's query without `page` and `page_size`.
    pub fn query(&self) -> &QueryParams {
        &self.queries.query
    }

    fn finish<R>(self, result: R) -> Paginated<R> {
        let nav = self.navigator.navigation();
        let base = self.base_path;
        let QueryBundle {
            mut query,
            mut first,
            mut last,
            mut previous,
            mut next,
        } = self.queries;

        query.set(PAGE_KEY, nav.page.to_string());
        query.set(PAGE_SIZE_KEY, nav.page_size.to_string());

        let first = query::rewrite(&base, &mut first, nav.first, nav.page_size);
        let last = (nav.last != 0).then(|| query::rewrite(&base, &mut last, nav.last, nav.page_size));
        let previous = query::rewrite(&base, &mut previous, nav.previous, nav.page_size);
        let next = query::rewrite(&base, &mut next, nav.next, nav.page_size);

        tracing::debug!(
            page = nav.page,
            page_size = nav.page_size,
            total = nav.total,
            "pagination resolved"
        );

        Paginated {
            pagination: PageFields {
                page: nav.page,
                page_size: nav.page_size,
                total: nav.total,
                first,
                last,
                previous,
                next,
                query,
            },
            result,
        }
    }
}
