//! HTTP client types for Canvas API communication.
//!
//! This module provides the connection layer: it turns a relative resource
//! path into single-entity or paginated HTTP retrieval.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Connection`]: The async HTTP connection to a Canvas installation
//! - [`Parameters`]: Ordered query parameters for a request
//! - [`ListOptions`]: Page limit and progress callback for listings
//! - [`HttpResponse`]: A parsed response, including its [`PageLinks`]
//! - [`HttpError`]: Everything that can go wrong during a request
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas_tools::clients::{Connection, ListOptions, Parameters};
//! use canvas_tools::{BaseUrl, Course};
//! use futures_util::TryStreamExt;
//!
//! let connection = Connection::new(BaseUrl::new("https://canvas.example.edu")?, None, None);
//!
//! // A single entity; `None` when the server answers 404
//! let course: Option<Course> = connection
//!     .retrieve("/api/v1/courses/42", &Parameters::new(), None)
//!     .await?;
//!
//! // Every page of a listing, fetched lazily
//! let courses: Vec<Course> = connection
//!     .list("api/v1/courses", &Parameters::new(), ListOptions::new(), None)
//!     .try_collect()
//!     .await?;
//! ```
//!
//! # Pagination
//!
//! Canvas returns list results a page at a time and points to the next page
//! with a `Link: <url>; rel="next"` header. [`Connection::list`] follows those
//! links until none is left, the page limit is hit, or the progress callback
//! returns `true`.
//!
//! # Retry Behavior
//!
//! There is none. Transport failures and non-success statuses are returned
//! to the caller immediately.

mod connection;
mod errors;
mod http_response;
mod list_options;
mod parameters;

pub use connection::{Connection, LIB_VERSION};
pub use errors::{DecodeError, HttpError, HttpResponseError};
pub use http_response::{HttpResponse, PageLinks};
pub use list_options::{ListOptions, ProgressUpdate};
pub use parameters::{Parameter, Parameters};
