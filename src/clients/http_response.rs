//! HTTP response types for the Canvas Tools library.
//!
//! This module provides the [`HttpResponse`] type and the [`PageLinks`]
//! parsed from Canvas's `Link` pagination header.

use std::collections::HashMap;

/// Pagination links parsed from the `Link` header.
///
/// Canvas paginates list endpoints with server-issued cursor URLs, sent as
/// RFC 5988 entries of the form `<url>; rel="next"`.
///
/// # Example
///
/// ```rust
/// use canvas_tools::clients::PageLinks;
///
/// let links = PageLinks::parse_link_header(
///     r#"<https://canvas.example.edu/api/v1/courses?page=2>; rel="next", <https://canvas.example.edu/api/v1/courses?page=1>; rel="first""#,
/// );
/// assert_eq!(links.next.as_deref(), Some("https://canvas.example.edu/api/v1/courses?page=2"));
/// assert!(links.prev.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// The URL of the current page.
    pub current: Option<String>,
    /// The URL of the next page.
    pub next: Option<String>,
    /// The URL of the previous page.
    pub prev: Option<String>,
    /// The URL of the first page.
    pub first: Option<String>,
    /// The URL of the last page.
    pub last: Option<String>,
}

impl PageLinks {
    /// Parses pagination links from a Link header value.
    ///
    /// Entries are comma-separated. For each relation only the first entry
    /// is kept, and a relation must match exactly (`rel="next"`).
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();

        for link in header_value.split(',').filter(|l| !l.trim().is_empty()) {
            let mut parts = link.split(';');
            let Some(url) = parts.next().map(Self::strip_brackets) else {
                continue;
            };

            for param in parts.map(str::trim) {
                let slot = match param {
                    r#"rel="current""# => &mut result.current,
                    r#"rel="next""# => &mut result.next,
                    r#"rel="prev""# => &mut result.prev,
                    r#"rel="first""# => &mut result.first,
                    r#"rel="last""# => &mut result.last,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = Some(url.to_string());
                }
            }
        }

        result
    }

    fn strip_brackets(url: &str) -> &str {
        let url = url.trim();
        url.strip_prefix('<')
            .and_then(|u| u.strip_suffix('>'))
            .unwrap_or(url)
    }
}

/// An HTTP response from the Canvas API.
///
/// Contains the response status code, headers, raw body, and the parsed
/// pagination links.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Pagination links from the `Link` header.
    pub links: PageLinks,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Link` header.
    ///
    /// Repeated `Link` headers are joined with `,` before parsing.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let links = headers
            .get("link")
            .map(|values| PageLinks::parse_link_header(&values.join(",")))
            .unwrap_or_default();

        Self {
            code,
            headers,
            body,
            links,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the response status code is 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code == 404
    }

    /// Returns the URL of the next page, if the server sent one.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.links.next.as_deref()
    }
}
