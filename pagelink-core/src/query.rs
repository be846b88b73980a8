use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PaginationError;

/// Query parameter holding the one-based page number.
pub const PAGE_KEY: &str = "page";
/// Query parameter holding the page size.
pub const PAGE_SIZE_KEY: &str = "page_size";

// Base for checking that a scheme-less link parses.
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// A query-string multimap: each key maps to one or more values.
///
/// Keys are kept sorted so [`QueryParams::encode`] is deterministic. Cloning
/// performs a deep copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace every value of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Encode as `key=value&...`, keys in lexicographic order and repeated
    /// values in insertion order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

/// Five independently owned copies of a cleaned query, one per rendered link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBundle {
    pub query: QueryParams,
    pub first: QueryParams,
    pub last: QueryParams,
    pub previous: QueryParams,
    pub next: QueryParams,
}

impl QueryBundle {
    pub fn from_cleaned(query: QueryParams) -> Self {
        QueryBundle {
            first: query.clone(),
            last: query.clone(),
            previous: query.clone(),
            next: query.clone(),
            query,
        }
    }
}

/// Result of splitting a request link into its pagination components.
///
/// `page` and `page_size` are raw values: they may be zero or negative and
/// are normalized by the navigator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLink {
    pub base_path: String,
    pub page: i64,
    pub page_size: i64,
    pub queries: QueryBundle,
    pub has_page: bool,
    pub has_page_size: bool,
}

/// Parse `link`, absorbing malformed input.
///
/// A link that cannot be parsed yields `ParsedLink::default()`: an empty base
/// path, zero page and page size, empty queries and both flags unset.
pub fn parse_link(link: &str, default_page_size: u64) -> ParsedLink {
    match try_parse_link(link, default_page_size) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to an empty link");
            ParsedLink::default()
        }
    }
}

/// Parse `link` into a base path, the requested page and page size, and the
/// remaining query parameters.
///
/// A missing or non-numeric `page` gives 1 and a missing or non-numeric
/// `page_size` gives `default_page_size`. The `has_*` flags report whether
/// the parameter was present and non-empty, whether or not it parsed.
///
/// The base path is the link text before `?` or `#`, kept as written: dot
/// segments, host case and explicit ports survive, and no `/` is added after
/// a bare host. Userinfo is dropped, as is the `//` of a network-path link.
///
/// A scheme-less `host:port/path` link reads as scheme `host`, so
/// `api.example.com:8080/books` gives the base path
/// `api.example.com://8080/books`. Include the scheme for links with a port.
///
/// # Errors
///
/// Returns `PaginationError::MalformedLink` when the link has an invalid
/// scheme or cannot be parsed as a URL.
pub fn try_parse_link(link: &str, default_page_size: u64) -> Result<ParsedLink, PaginationError> {
    let (base_path, mut query) = split_link(link)?;

    let (page, has_page) = match query.get(PAGE_KEY) {
        Some(raw) if !raw.is_empty() => (raw.parse::<i64>().unwrap_or(1), true),
        _ => (1, false),
    };

    let fallback_size = i64::try_from(default_page_size).unwrap_or(i64::MAX);
    let (page_size, has_page_size) = match query.get(PAGE_SIZE_KEY) {
        Some(raw) if !raw.is_empty() => (raw.parse::<i64>().unwrap_or(fallback_size), true),
        _ => (fallback_size, false),
    };

    query.remove(PAGE_KEY);
    query.remove(PAGE_SIZE_KEY);

    Ok(ParsedLink {
        base_path,
        page,
        page_size,
        queries: QueryBundle::from_cleaned(query),
        has_page,
        has_page_size,
    })
}

/// Set `page` and `page_size` on `query` and render `base_path?query`.
pub fn rewrite(base_path: &str, query: &mut QueryParams, page: u64, page_size: u64) -> String {
    query.set(PAGE_KEY, page.to_string());
    query.set(PAGE_SIZE_KEY, page_size.to_string());
    format!("{base_path}?{}", query.encode())
}

fn split_link(link: &str) -> Result<(String, QueryParams), PaginationError> {
    let absolute = has_scheme(link)?;
    validate(link, absolute)?;

    let without_fragment = link.split_once('#').map_or(link, |(head, _)| head);
    let (target, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));

    let base_path = match target.split_once(':') {
        Some((scheme, rest)) if absolute => match rest.strip_prefix("//") {
            Some(hierarchy) => {
                let (authority, path) = split_authority(hierarchy);
                format!("{scheme}://{authority}{path}")
            }
            None => format!("{scheme}://{rest}"),
        },
        _ => match target.strip_prefix("//") {
            Some(hierarchy) => {
                let (authority, path) = split_authority(hierarchy);
                format!("{authority}{path}")
            }
            None => target.to_string(),
        },
    };
    Ok((base_path, QueryParams::parse(query)))
}

// The base path is taken from the link text; `url` only checks that it parses.
fn validate(link: &str, absolute: bool) -> Result<(), PaginationError> {
    let parsed = if absolute {
        Url::parse(link)
    } else {
        let base = Url::parse(RELATIVE_BASE).map_err(|e| PaginationError::malformed(link, e))?;
        Url::options().base_url(Some(&base)).parse(link)
    };
    parsed
        .map(|_| ())
        .map_err(|e| PaginationError::malformed(link, e))
}

/// Split `host[:port]/path` after the `//`, dropping any userinfo.
fn split_authority(hierarchy: &str) -> (&str, &str) {
    let end = hierarchy.find('/').unwrap_or(hierarchy.len());
    let (authority, path) = hierarchy.split_at(end);
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    (host, path)
}

/// Whether `link` starts with a scheme. A colon ahead of any `/`, `?` or `#`
/// must be preceded by a valid scheme name.
fn has_scheme(link: &str) -> Result<bool, PaginationError> {
    let Some(colon) = link.find(':') else {
        return Ok(false);
    };
    let candidate = &link[..colon];
    if candidate.contains(['/', '?', '#']) {
        return Ok(false);
    }

    let mut chars = candidate.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid {
        Ok(true)
    } else if candidate.is_empty() {
        Err(PaginationError::malformed(link, "missing protocol scheme"))
    } else {
        Err(PaginationError::malformed(link, "first path segment cannot contain a colon"))
    }
}
