//! Term entity.
//!
//! Terms are the enrollment periods of an account. Canvas returns them from
//! `/api/v1/accounts/{account_id}/terms/{term_id}` and embeds them in courses
//! when asked to.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::entities::{null_as_default, Claim, Entity, LockState, Lockable};
use crate::error::EntityLockedError;

/// An enrollment term in Canvas.
///
/// Terms are equal when their ids are equal. They sort by
/// [`when_starts`](Term::when_starts), with an unset start sorting first.
///
/// # Example
///
/// ```rust
/// use canvas_tools::entities::Term;
///
/// let term: Term = serde_json::from_str(
///     r#"{"id": 7, "name": "Fall 2024", "start_at": "2024-09-01T00:00:00Z", "end_at": null}"#,
/// )
/// .unwrap();
///
/// assert_eq!(term.name(), "Fall 2024");
/// assert!(term.when_starts().is_some());
/// assert!(term.when_ends().is_none());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    id: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    name: String,

    #[serde(rename = "start_at", default)]
    when_starts: Option<DateTime<Utc>>,

    #[serde(rename = "end_at", default)]
    when_ends: Option<DateTime<Utc>>,

    #[serde(skip)]
    canvas: Option<Canvas>,

    #[serde(skip)]
    lock: LockState,
}

impl Term {
    /// Returns the identifier of the term.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the name of the term.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns when the term starts, if set.
    #[must_use]
    pub const fn when_starts(&self) -> Option<DateTime<Utc>> {
        self.when_starts
    }

    /// Returns when the term ends, if set.
    #[must_use]
    pub const fn when_ends(&self) -> Option<DateTime<Utc>> {
        self.when_ends
    }

    /// Returns the context this term was retrieved through, if any.
    #[must_use]
    pub const fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Sets the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the term is locked.
    pub fn set_id(&mut self, id: u64) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.id = id;
        Ok(())
    }

    /// Sets the name.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the term is locked.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.name = name.into();
        Ok(())
    }

    /// Sets when the term starts.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the term is locked.
    pub fn set_when_starts(
        &mut self,
        when_starts: Option<DateTime<Utc>>,
    ) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.when_starts = when_starts;
        Ok(())
    }

    /// Sets when the term ends.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the term is locked.
    pub fn set_when_ends(
        &mut self,
        when_ends: Option<DateTime<Utc>>,
    ) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.when_ends = when_ends;
        Ok(())
    }

    /// Sets the owning context.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the term is locked.
    pub fn set_canvas(&mut self, canvas: Option<Canvas>) -> Result<(), EntityLockedError> {
        self.lock.guard()?;
        self.canvas = canvas;
        Ok(())
    }
}

impl Lockable for Term {
    fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    fn lock(&mut self) {
        self.lock.lock();
    }
}

impl Entity for Term {
    fn id(&self) -> u64 {
        self.id
    }

    fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    fn compare_ordering(&self, other: &Self) -> Ordering {
        let start = |term: &Self| term.when_starts.unwrap_or(DateTime::<Utc>::MIN_UTC);
        start(self).cmp(&start(other))
    }
}

impl Claim for Term {
    fn claim(mut self, canvas: &Canvas) -> Self {
        self.canvas = Some(canvas.clone());
        self.lock.lock();
        self
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.compare_identity(other)
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn term(id: u64, when_starts: Option<DateTime<Utc>>) -> Term {
        let mut term = Term::default();
        term.set_id(id).unwrap();
        term.set_name(format!("Term {id}")).unwrap();
        term.set_when_starts(when_starts).unwrap();
        term
    }

    #[test]
    fn test_setters_work_when_unlocked() {
        let mut term = Term::default();
        term.set_id(123).unwrap();
        term.set_name("new name").unwrap();
        term.set_when_starts(Some(date(2024, 1, 8))).unwrap();
        term.set_when_ends(Some(date(2024, 5, 3))).unwrap();

        assert_eq!(term.id(), 123);
        assert_eq!(term.name(), "new name");
        assert_eq!(term.when_starts(), Some(date(2024, 1, 8)));
        assert_eq!(term.when_ends(), Some(date(2024, 5, 3)));
        assert!(!term.is_locked());
    }

    #[test]
    fn test_setters_fail_when_locked() {
        let mut term = term(1, None);
        term.lock();

        assert_eq!(term.set_id(2), Err(EntityLockedError));
        assert_eq!(term.set_name("changed"), Err(EntityLockedError));
        assert_eq!(
            term.set_when_starts(Some(date(2024, 1, 8))),
            Err(EntityLockedError)
        );
        assert_eq!(
            term.set_when_ends(Some(date(2024, 5, 3))),
            Err(EntityLockedError)
        );
        assert_eq!(term.set_canvas(None), Err(EntityLockedError));

        assert_eq!(term.id(), 1);
        assert_eq!(term.name(), "Term 1");
        assert!(term.when_starts().is_none());
    }

    #[test]
    fn test_equality_uses_id_only() {
        let spring = term(1, Some(date(2024, 1, 8)));
        let mut renamed = term(1, Some(date(2024, 9, 1)));
        renamed.set_name("Something else").unwrap();
        assert_eq!(spring, renamed);

        let other = term(2, Some(date(2024, 1, 8)));
        assert_ne!(spring, other);
    }

    #[test]
    fn test_ordering_uses_start_date() {
        let spring = term(1, Some(date(2024, 1, 8)));
        let fall = term(2, Some(date(2024, 9, 1)));
        let unset = term(3, None);

        assert_eq!(spring.compare_ordering(&fall), Ordering::Less);
        assert_eq!(fall.compare_ordering(&spring), Ordering::Greater);
        assert_eq!(unset.compare_ordering(&spring), Ordering::Less);
        assert_eq!(unset.compare_ordering(&term(4, None)), Ordering::Equal);
    }

    #[test]
    fn test_compare_to_edge_cases_sort_after() {
        let term = term(1, Some(date(2024, 1, 8)));
        let course = crate::entities::Course::default();

        assert_eq!(term.compare_to(None), Ordering::Greater);
        assert_eq!(term.compare_to(Some(&"garbage")), Ordering::Greater);
        assert_eq!(term.compare_to(Some(&course)), Ordering::Greater);
        assert_eq!(term.compare_to(Some(&term.clone())), Ordering::Equal);
    }

    #[test]
    fn test_deserialize_from_canvas_json() {
        let term: Term = serde_json::from_str(
            r#"{"id": 3, "name": "Spring", "start_at": "2024-01-08T00:00:00Z", "end_at": "2024-05-03T00:00:00Z", "workflow_state": "active"}"#,
        )
        .unwrap();

        assert_eq!(term.id(), 3);
        assert_eq!(term.when_starts(), Some(date(2024, 1, 8)));
        assert_eq!(term.when_ends(), Some(date(2024, 5, 3)));
        assert!(!term.is_locked());
        assert!(term.canvas().is_none());
    }

    #[test]
    fn test_display_shows_name_and_id() {
        assert_eq!(term(5, None).to_string(), "Term 5 [5]");
    }
}
