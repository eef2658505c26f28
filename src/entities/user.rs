//! User entity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use futures_util::Stream;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::canvas::Canvas;
use crate::clients::{HttpError, ListOptions};
use crate::entities::{null_as_default, Claim, Course, Entity, LockState, Lockable};
use crate::error::EntityLockedError;

/// A user in Canvas.
///
/// Users are equal when their ids are equal. They sort by name, compared
/// ordinally (byte by byte).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    id: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    name: String,

    #[serde(skip)]
    canvas: Option<Canvas>,

    #[serde(skip)]
    lock: LockState,
}

impl User {
    /// Returns the identifier of the user.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the name of the user.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the context this user was retrieved through, if any.
    #[must_use]
    pub const fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Sets the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the user is locked.
    pub fn set_id(&mut self, id: u64) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.id = id;
        Ok(())
    }

    /// Sets the name.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the user is locked.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.name = name.into();
        Ok(())
    }

    /// Sets the owning context.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the user is locked.
    pub fn set_canvas(&mut self, canvas: Option<Canvas>) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.canvas = canvas;
        Ok(())
    }

    /// Lists the courses of this user.
    ///
    /// Requests `api/v1/users/{id}/courses` through the user's context. Every
    /// course is bound to that context and locked as it is produced.
    ///
    /// # Panics
    ///
    /// Panics if the user has no context. Users obtained from a
    /// [`Canvas`] always have one.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use futures_util::TryStreamExt;
    ///
    /// let user = canvas.retrieve_current_user(None).await?.expect("signed in");
    /// let courses: Vec<Course> = user
    ///     .list_courses(ListOptions::new(), None)
    ///     .try_collect()
    ///     .await?;
    /// ```
    pub fn list_courses(
        &self,
        options: ListOptions,
        cancel: Option<CancellationToken>,
    ) -> impl Stream<Item = Result<Course, HttpError>> + Send + 'static {
        let canvas = self
            .canvas
            .as_ref()
            .expect("User must be retrieved through a Canvas to list its courses");
        canvas.list_courses_for_user(self.id, options, cancel)
    }
}

impl Lockable for User {
    fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    fn lock(&mut self) {
        self.lock.lock();
    }
}

impl Entity for User {
    fn id(&self) -> u64 {
        self.id
    }

    fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    fn compare_ordering(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Claim for User {
    fn claim(mut self, canvas: &Canvas) -> Self {
        self.canvas = Some(canvas.clone());
        self.lock.lock();
        self
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.compare_identity(other)
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;

    fn user(id: u64, name: &str) -> User {
        let mut user = User::default();
        user.set_id(id).unwrap();
        user.set_name(name).unwrap();
        user
    }

    #[test]
    fn test_setters_work_when_unlocked() {
        let canvas = Canvas::builder(BaseUrl::new("http://127.0.0.1").unwrap()).build();
        let mut user = user(456, "old name");
        user.set_id(123).unwrap();
        user.set_name("new name").unwrap();
        user.set_canvas(Some(canvas.clone())).unwrap();

        assert_eq!(user.id(), 123);
        assert_eq!(user.name(), "new name");
        assert!(user.canvas().unwrap().ptr_eq(&canvas));
    }

    #[test]
    fn test_setters_fail_when_locked() {
        let mut user = user(1, "Bob");
        user.lock();
        user.lock();

        assert!(user.is_locked());
        assert_eq!(user.set_id(2), Err(EntityLockedError));
        assert_eq!(user.set_name("Bill"), Err(EntityLockedError));
        assert_eq!(user.set_canvas(None), Err(EntityLockedError));
        assert_eq!(user.name(), "Bob");
    }

    #[test]
    fn test_equality_uses_id_only() {
        assert_eq!(user(1, "Bob"), user(1, "Bill"));
        assert_ne!(user(1, "Bob"), user(2, "Bob"));
    }

    #[test]
    fn test_ordering_is_ordinal_on_name() {
        assert_eq!(user(1, "Bob").compare_ordering(&user(2, "Bill")), Ordering::Greater);
        assert_eq!(user(1, "Bill").compare_ordering(&user(2, "Bob")), Ordering::Less);
        assert_eq!(user(1, "bob").compare_ordering(&user(2, "Bob")), Ordering::Greater);
        assert_eq!(user(1, "Bob").compare_ordering(&user(2, "Bob")), Ordering::Equal);
    }

    #[test]
    fn test_compare_to_edge_cases_sort_after() {
        let user = user(1, "Bob");
        let term = crate::entities::Term::default();

        assert_eq!(user.compare_to(None), Ordering::Greater);
        assert_eq!(user.compare_to(Some(&"garbage")), Ordering::Greater);
        assert_eq!(user.compare_to(Some(&term)), Ordering::Greater);
        assert_eq!(user.compare_to(Some(&self::user(2, "Bill"))), Ordering::Greater);
    }

    #[test]
    #[should_panic(expected = "retrieved through a Canvas")]
    fn test_list_courses_requires_canvas() {
        let _ = user(1, "Bob").list_courses(ListOptions::new(), None);
    }
}
