//! Course entity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::entities::{null_as_default, Claim, Entity, LockState, Lockable, Term};
use crate::error::EntityLockedError;

/// A course in Canvas.
///
/// Courses are equal when their ids are equal. They sort by course code,
/// compared ordinally (byte by byte).
///
/// The `code` field is `course_code` on the wire. When Canvas does not embed
/// the course's term, [`term`](Course::term) is an unset default term.
///
/// # Example
///
/// ```rust
/// use canvas_tools::entities::Course;
///
/// let course: Course = serde_json::from_str(
///     r#"{"id": 42, "course_code": "CS-101", "name": "Intro to Rust"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(course.code(), "CS-101");
/// assert_eq!(course.term().id(), 0);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    id: u64,

    #[serde(
        rename = "course_code",
        alias = "code",
        default,
        deserialize_with = "null_as_default"
    )]
    code: String,

    #[serde(default, deserialize_with = "null_as_default")]
    name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    term: Term,

    #[serde(skip)]
    canvas: Option<Canvas>,

    #[serde(skip)]
    lock: LockState,
}

impl Course {
    /// Returns the identifier of the course.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the course code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the name of the course.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the term the course is offered in.
    #[must_use]
    pub const fn term(&self) -> &Term {
        &self.term
    }

    /// Returns the context this course was retrieved through, if any.
    #[must_use]
    pub const fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Sets the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the course is locked.
    pub fn set_id(&mut self, id: u64) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.id = id;
        Ok(())
    }

    /// Sets the course code.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the course is locked.
    pub fn set_code(&mut self, code: impl Into<String>) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.code = code.into();
        Ok(())
    }

    /// Sets the name.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the course is locked.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.name = name.into();
        Ok(())
    }

    /// Sets the term.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the course is locked.
    pub fn set_term(&mut self, term: Term) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.term = term;
        Ok(())
    }

    /// Sets the owning context.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the course is locked.
    pub fn set_canvas(&mut self, canvas: Option<Canvas>) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.canvas = canvas;
        Ok(())
    }
}

impl Lockable for Course {
    fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    fn lock(&mut self) {
        self.lock.lock();
    }
}

impl Entity for Course {
    fn id(&self) -> u64 {
        self.id
    }

    fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    fn compare_ordering(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl Claim for Course {
    fn claim(mut self, canvas: &Canvas) -> Self {
        self.term = self.term.claim(canvas);
        self.canvas = Some(canvas.clone());
        self.lock.lock();
        self
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.compare_identity(other)
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}
