/// Errors reported by the navigator and the link parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// A negative page, page size or total was passed to a setter.
    InvalidArgument { name: &'static str, value: i64 },
    /// The link could not be parsed into a base path and a query.
    MalformedLink { link: String, reason: String },
}

impl PaginationError {
    pub(crate) fn negative(name: &'static str, value: i64) -> Self {
        PaginationError::InvalidArgument { name, value }
    }

    pub(crate) fn malformed(link: &str, reason: impl std::fmt::Display) -> Self {
        PaginationError::MalformedLink {
            link: link.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for PaginationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaginationError::InvalidArgument { name, value } => {
                write!(f, "Invalid argument: {name} can't be a negative number (got {value})")
            }
            PaginationError::MalformedLink { link, reason } => {
                write!(f, "Malformed link '{link}': {reason}")
            }
        }
    }
}

impl std::error::Error for PaginationError {}
