use std::ops::Range;

/// A sequence that can report its length and be cut down to a sub-range.
///
/// Implement this for collection types that should be paginated in memory
/// with [`Paginator::wrap_with_truncate`](crate::Paginator::wrap_with_truncate).
pub trait Truncatable: Sized {
    fn length(&self) -> usize;

    /// Keep only the items in `range`. The range is always within
    /// `0..=self.length()` when called through [`truncate`].
    fn slice(self, range: Range<usize>) -> Self;
}

impl<T> Truncatable for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }

    fn slice(mut self, range: Range<usize>) -> Self {
        self.truncate(range.end);
        self.drain(..range.start);
        self
    }
}

impl<'a, T> Truncatable for &'a [T] {
    fn length(&self) -> usize {
        self.len()
    }

    fn slice(self, range: Range<usize>) -> Self {
        &self[range]
    }
}

/// Slice `items` to `range`, bounding both ends by the actual length.
pub fn truncate<T: Truncatable>(items: T, range: Range<usize>) -> T {
    let len = items.length();
    let end = range.end.min(len);
    let start = range.start.min(end);
    items.slice(start..end)
}
