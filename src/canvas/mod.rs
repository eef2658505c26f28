//! The root context for a Canvas installation.
//!
//! A [`Canvas`] binds a [`Connection`] to the entity retrieval operations.
//! Every entity it returns has been bound to it and locked, so callers can
//! navigate from an entity back to its context but never modify it.
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas_tools::{AccessToken, BaseUrl, Canvas};
//! use canvas_tools::clients::ListOptions;
//! use futures_util::TryStreamExt;
//!
//! let canvas = Canvas::builder(BaseUrl::new("https://canvas.example.edu")?)
//!     .token(AccessToken::new("1234~abcdef")?)
//!     .build();
//!
//! if let Some(course) = canvas.retrieve_course(42, None).await? {
//!     println!("{course}");
//! }
//!
//! let courses: Vec<_> = canvas
//!     .list_courses_for_current_user(ListOptions::new().max_pages(2), None)
//!     .try_collect()
//!     .await?;
//! ```

mod builder;

use std::fmt;
use std::sync::Arc;

use futures_util::{Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::clients::{Connection, HttpError, ListOptions, Parameters};
use crate::config::BaseUrl;
use crate::entities::{Claim, Course, Term, User};
use crate::logging::emit;

pub use builder::CanvasBuilder;

/// The root level connection to a Canvas installation.
///
/// `Canvas` is a cheap handle: clones share the same connection, and
/// [`ptr_eq`](Canvas::ptr_eq) tells whether two handles are the same
/// instance. Entities keep a handle to the `Canvas` they came from.
#[derive(Clone)]
pub struct Canvas {
    inner: Arc<Connection>,
}

// Verify Canvas is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Canvas>();
};

impl Canvas {
    /// Creates a builder for the installation at `base_url`.
    #[must_use]
    pub const fn builder(base_url: BaseUrl) -> CanvasBuilder {
        CanvasBuilder::new(base_url)
    }

    pub(crate) fn new(connection: Connection) -> Self {
        Self {
            inner: Arc::new(connection),
        }
    }

    /// Returns the underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.inner
    }

    /// Returns `true` if both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Retrieves the high level details of a course.
    ///
    /// # Returns
    ///
    /// The course, bound to this instance and locked, or `None` if it does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for any failure other than "not found".
    pub async fn retrieve_course(
        &self,
        course_id: u64,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<Course>, HttpError> {
        self.log(|| debug!(course_id, "Retrieving course with id {course_id}"));
        self.retrieve(&format!("/api/v1/courses/{course_id}"), cancel)
            .await
    }

    /// Retrieves a term of an account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for any failure other than "not found".
    pub async fn retrieve_term(
        &self,
        account_id: u64,
        term_id: u64,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<Term>, HttpError> {
        self.log(|| {
            debug!(account_id, term_id, "Retrieving term with id {term_id} in {account_id}");
        });
        self.retrieve(
            &format!("/api/v1/accounts/{account_id}/terms/{term_id}"),
            cancel,
        )
        .await
    }

    /// Retrieves the user the access token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for any failure other than "not found".
    pub async fn retrieve_current_user(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<User>, HttpError> {
        self.log(|| debug!("Retrieving current user"));
        self.retrieve("/api/v1/users/self", cancel).await
    }

    /// Lists the courses of the user the access token belongs to.
    ///
    /// The stream is lazy; see [`Connection::list`] for its paging and error
    /// behavior. Every course is bound to this instance and locked.
    pub fn list_courses_for_current_user(
        &self,
        options: ListOptions,
        cancel: Option<CancellationToken>,
    ) -> impl Stream<Item = Result<Course, HttpError>> + Send + 'static {
        self.log(|| debug!("Retrieving courses for current user"));
        self.list("api/v1/courses", options, cancel)
    }

    pub(crate) fn list_courses_for_user(
        &self,
        user_id: u64,
        options: ListOptions,
        cancel: Option<CancellationToken>,
    ) -> impl Stream<Item = Result<Course, HttpError>> + Send + 'static {
        self.log(|| debug!(user_id, "Retrieving courses for {user_id}"));
        self.list(&format!("api/v1/users/{user_id}/courses"), options, cancel)
    }

    async fn retrieve<T>(
        &self,
        path: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<T>, HttpError>
    where
        T: DeserializeOwned + Claim,
    {
        let item = self
            .inner
            .retrieve::<T>(path, &Parameters::new(), cancel)
            .await?;
        Ok(item.map(|item| item.claim(self)))
    }

    fn list<T>(
        &self,
        path: &str,
        options: ListOptions,
        cancel: Option<CancellationToken>,
    ) -> impl Stream<Item = Result<T, HttpError>> + Send + 'static
    where
        T: DeserializeOwned + Claim + Send + 'static,
    {
        let canvas = self.clone();
        self.inner
            .list::<T>(path, &Parameters::new(), options, cancel)
            .map_ok(move |item| item.claim(&canvas))
    }

    fn log(&self, event: impl FnOnce()) {
        emit(self.inner.logger(), event);
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("base_url", self.inner.base_url())
            .finish_non_exhaustive()
    }
}
