use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::PaginationError;

/// Page size used when neither the request nor the configuration provides one.
pub const DEFAULT_PAGE_SIZE: u64 = 30;

/// Clamp `value` into the inclusive range spanned by `lo` and `hi`.
///
/// The bounds may be given in either order.
pub fn clamp(lo: u64, hi: u64, value: u64) -> u64 {
    let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
    value.max(lo).min(hi)
}

/// Integer ceiling division. A zero divisor yields 0.
pub fn div_ceil(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a - 1) / b + 1
}

/// Zero-based half-open `[start, end)` range of item offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRange {
    pub start: u64,
    pub end: u64,
}

impl OffsetRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert into an index range usable for slicing in-memory sequences.
    pub fn to_range(self) -> Range<usize> {
        let start = usize::try_from(self.start).unwrap_or(usize::MAX);
        let end = usize::try_from(self.end).unwrap_or(usize::MAX);
        start..end
    }
}

impl From<OffsetRange> for Range<usize> {
    fn from(range: OffsetRange) -> Self {
        range.to_range()
    }
}

/// Snapshot of a navigator's page numbers.
///
/// `last` is 0 while the total is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub first: u64,
    pub last: u64,
    pub previous: u64,
    pub next: u64,
}

/// Pagination arithmetic for a single request.
///
/// A navigator starts with an unknown total (0). Once the total is set, the
/// current page is clamped to the last page and `previous`/`next` are bounded
/// by `[1, last]`. While the total is unknown `next` has no upper bound.
///
/// ```
/// use pagelink_core::Navigator;
///
/// let mut nav = Navigator::new(5, 10);
/// nav.set_total(49).unwrap();
///
/// let n = nav.navigation();
/// assert_eq!((n.last, n.previous, n.next), (5, 4, 5));
/// assert_eq!(nav.offset_range().to_range(), 40..49);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    page: u64,
    page_size: u64,
    total: u64,
    first_page: u64,
    last_page: u64,
    previous_page: u64,
    next_page: u64,
    default_page_size: u64,
}

impl Navigator {
    /// Create a navigator using [`DEFAULT_PAGE_SIZE`] as the fallback size.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self::with_default_page_size(page, page_size, DEFAULT_PAGE_SIZE)
    }

    /// Create a navigator with an explicit fallback page size.
    ///
    /// A non-positive `page` becomes 1 and a non-positive `page_size`
    /// becomes `default_page_size`. A zero default falls back to
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn with_default_page_size(page: i64, page_size: i64, default_page_size: u64) -> Self {
        let default_page_size = if default_page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            default_page_size
        };
        let mut navigator = Navigator {
            page: normalize_page(page),
            page_size: normalize_page_size(page_size, default_page_size),
            total: 0,
            first_page: 1,
            last_page: 0,
            previous_page: 1,
            next_page: 2,
            default_page_size,
        };
        navigator.recompute();
        navigator
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn first_page(&self) -> u64 {
        self.first_page
    }

    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    pub fn previous_page(&self) -> u64 {
        self.previous_page
    }

    pub fn next_page(&self) -> u64 {
        self.next_page
    }

    pub fn default_page_size(&self) -> u64 {
        self.default_page_size
    }

    /// `(page, page_size, total)`.
    pub fn indicator(&self) -> (u64, u64, u64) {
        (self.page, self.page_size, self.total)
    }

    pub fn navigation(&self) -> Navigation {
        Navigation {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            first: self.first_page,
            last: self.last_page,
            previous: self.previous_page,
            next: self.next_page,
        }
    }

    /// Set the total number of items. 0 means the total is unknown.
    ///
    /// # Errors
    ///
    /// Returns `PaginationError::InvalidArgument` for a negative total, in
    /// which case the navigator is left untouched.
    pub fn set_total(&mut self, total: i64) -> Result<(), PaginationError> {
        self.total = non_negative("total", total)?;
        self.recompute();
        Ok(())
    }

    /// Change the page size. 0 selects the default page size.
    ///
    /// # Errors
    ///
    /// Returns `PaginationError::InvalidArgument` for a negative size.
    pub fn set_page_size(&mut self, page_size: i64) -> Result<(), PaginationError> {
        let page_size = non_negative("page_size", page_size)?;
        self.page_size = normalize_page_size_u64(page_size, self.default_page_size);
        self.recompute();
        Ok(())
    }

    /// Set page, page size and total at once.
    ///
    /// All three are validated before anything changes. A zero page becomes 1
    /// and a zero page size becomes the default.
    pub fn set_indicator(
        &mut self,
        page: i64,
        page_size: i64,
        total: i64,
    ) -> Result<(), PaginationError> {
        let page = non_negative("page", page)?;
        let page_size = non_negative("page_size", page_size)?;
        let total = non_negative("total", total)?;

        self.page = page.max(1);
        self.page_size = normalize_page_size_u64(page_size, self.default_page_size);
        self.total = total;
        self.recompute();
        Ok(())
    }

    /// Move to another page and page size, keeping the known total.
    pub fn set_page_info(&mut self, page: i64, page_size: i64) {
        self.page = normalize_page(page);
        self.page_size = normalize_page_size(page_size, self.default_page_size);
        self.recompute();
    }

    /// Navigator for another page and size that shares this one's total.
    pub fn clone_with_page(&self, page: i64, page_size: i64) -> Navigator {
        let mut navigator = self.clone();
        navigator.set_page_info(page, page_size);
        navigator
    }

    /// Navigator positioned on the page that contains the zero-based item
    /// index `cursor`.
    pub fn clone_with_cursor(&self, cursor: u64, page_size: i64) -> Navigator {
        let page_size = normalize_page_size(page_size, self.default_page_size);
        let page = cursor / page_size + 1;
        let mut navigator = self.clone();
        navigator.page = page;
        navigator.page_size = page_size;
        navigator.recompute();
        navigator
    }

    /// Offset range of the current page.
    pub fn offset_range(&self) -> OffsetRange {
        self.offset_range_for(self.page)
    }

    /// Offset range of an arbitrary page using the current page size.
    ///
    /// While the total is unknown the range is not clamped; the caller must
    /// bound it against its own sequence.
    pub fn offset_range_for(&self, page: u64) -> OffsetRange {
        self.range_with(page, self.page_size)
    }

    /// Offset range of the page of size `page_size` containing the zero-based
    /// item index `cursor`. A zero page size selects the default.
    pub fn range_for_cursor(&self, cursor: u64, page_size: u64) -> OffsetRange {
        let page_size = normalize_page_size_u64(page_size, self.default_page_size);
        self.range_with(cursor / page_size + 1, page_size)
    }

    fn range_with(&self, page: u64, page_size: u64) -> OffsetRange {
        let offset = page.saturating_sub(1).saturating_mul(page_size);

        if self.total == 0 {
            return OffsetRange::new(offset, offset.saturating_add(page_size));
        }

        let offset = clamp(0, self.total, offset);
        let length = clamp(0, self.total - offset, page_size);
        OffsetRange::new(offset, offset + length)
    }

    fn recompute(&mut self) {
        self.first_page = 1;

        if self.total == 0 {
            self.last_page = 0;
            self.previous_page = self.page.saturating_sub(1).max(self.first_page);
            self.next_page = self.page.saturating_add(1);
            return;
        }

        self.last_page = div_ceil(self.total, self.page_size);
        if self.page > self.last_page {
            tracing::trace!(
                page = self.page,
                last_page = self.last_page,
                "page beyond last page, clamping"
            );
            self.page = self.last_page;
        }
        self.previous_page = clamp(self.first_page, self.last_page, self.page.saturating_sub(1));
        self.next_page = clamp(self.first_page, self.last_page, self.page.saturating_add(1));
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<u64, PaginationError> {
    u64::try_from(value).map_err(|_| PaginationError::negative(name, value))
}

fn normalize_page(page: i64) -> u64 {
    u64::try_from(page).ok().filter(|p| *p > 0).unwrap_or(1)
}

fn normalize_page_size(page_size: i64, default_page_size: u64) -> u64 {
    u64::try_from(page_size)
        .ok()
        .filter(|s| *s > 0)
        .unwrap_or(default_page_size)
}

fn normalize_page_size_u64(page_size: u64, default_page_size: u64) -> u64 {
    if page_size == 0 {
        default_page_size
    } else {
        page_size
    }
}
