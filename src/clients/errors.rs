//! Connection error types for the Canvas Tools library.
//!
//! # Error Handling
//!
//! The library uses specific error types for different failure scenarios:
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`DecodeError`]: A response body that does not match the expected JSON shape
//! - [`HttpError`]: Unified error type encompassing all connection errors
//!
//! A 404 from a single-entity retrieval is not an error: it is reported as
//! `Ok(None)`. Nothing is retried; every failure reaches the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas_tools::clients::HttpError;
//!
//! match canvas.retrieve_course(42, None).await {
//!     Ok(Some(course)) => println!("Found: {}", course.name()),
//!     Ok(None) => println!("No such course"),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Cancelled) => println!("Cancelled"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use canvas_tools::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: "Unauthorized".to_string(),
///     url: "http://127.0.0.1/api/v1/users/self".to_string(),
/// };
///
/// assert!(error.to_string().contains("401"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Response status code does not indicate success: {code} ({message}) for {url}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The canonical reason phrase, or the response body when it has one.
    pub message: String,
    /// The URL that was requested.
    pub url: String,
}

/// Error returned when a response body cannot be decoded.
#[derive(Debug, Error)]
#[error("Unable to decode response from {url}: {source}")]
pub struct DecodeError {
    /// The URL that was requested.
    pub url: String,
    /// The underlying JSON error.
    #[source]
    pub source: serde_json::Error,
}

/// Unified error type for all connection errors.
///
/// # Example
///
/// ```rust,ignore
/// use canvas_tools::clients::HttpError;
///
/// match result {
///     Ok(value) => { /* handle success */ }
///     Err(HttpError::Response(e)) => { /* non-2xx status, see e.code */ }
///     Err(HttpError::Decode(e)) => { /* malformed body */ }
///     Err(HttpError::Cancelled) => { /* caller cancelled */ }
///     Err(HttpError::Network(e)) => { /* transport failure */ }
///     Err(HttpError::InvalidUrl(e)) => { /* unusable request URL */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The response body did not match the expected JSON shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The caller's cancellation token fired before the operation completed.
    #[error("The operation was cancelled")]
    Cancelled,

    /// The request URL could not be parsed.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if this error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns `true` if the operation was cancelled by the caller.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
