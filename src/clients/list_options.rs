//! Options controlling paginated list operations.

use std::fmt;
use std::sync::Arc;

/// The details of a progress update, reported after every page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// The number of items retrieved so far.
    pub item_count: usize,
    /// The number of pages retrieved so far (1-based).
    pub page_count: usize,
}

type ProgressCallback = Arc<dyn Fn(ProgressUpdate) -> bool + Send + Sync>;

/// The options for a list operation.
///
/// - `max_pages`: a hard ceiling on the number of pages requested
/// - `on_progress`: called after each page; returning `true` stops the
///   listing after the current page
///
/// # Example
///
/// ```rust
/// use canvas_tools::clients::ListOptions;
///
/// let options = ListOptions::new()
///     .max_pages(5)
///     .on_progress(|update| {
///         println!("{} items over {} pages", update.item_count, update.page_count);
///         update.item_count >= 200
///     });
///
/// assert_eq!(options.page_limit(), Some(5));
/// ```
#[derive(Clone, Default)]
pub struct ListOptions {
    max_pages: Option<usize>,
    on_progress: Option<ProgressCallback>,
}

impl ListOptions {
    /// Creates options with no page limit and no progress callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of pages to retrieve.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Sets the callback invoked after every page.
    ///
    /// Return `true` from the callback to stop after the current page.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) -> bool + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Returns the configured page limit, if any.
    #[must_use]
    pub const fn page_limit(&self) -> Option<usize> {
        self.max_pages
    }

    /// Returns `true` if `pages_fetched` has reached the page limit.
    pub(crate) fn limit_reached(&self, pages_fetched: usize) -> bool {
        self.max_pages.is_some_and(|max| pages_fetched >= max)
    }

    /// Reports progress, returning `true` if the caller asked to stop.
    pub(crate) fn report(&self, update: ProgressUpdate) -> bool {
        self.on_progress
            .as_ref()
            .is_some_and(|callback| callback(update))
    }
}

impl fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListOptions")
            .field("max_pages", &self.max_pages)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
