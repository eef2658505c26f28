//! Canvas domain entities.
//!
//! This module provides the entities returned by a [`Canvas`]:
//!
//! - [`Course`]: A course, ordered by its code
//! - [`Term`]: An enrollment term, ordered by when it starts
//! - [`User`]: A user, ordered by name
//!
//! # Identity and Ordering
//!
//! Two entities of the same type are equal when their ids are equal, no
//! matter what their other fields hold. Sorting uses a different, per-type
//! field through [`Entity::compare_ordering`]; because the two disagree, the
//! entities implement `Eq` and `Hash` but not `PartialOrd`.
//!
//! # Locking
//!
//! Entities deserialized by a [`Connection`](crate::clients::Connection) are
//! mutable. A [`Canvas`] binds every entity it hands out to itself and then
//! locks it, after which each setter returns
//! [`EntityLockedError`](crate::EntityLockedError).
//!
//! ```rust
//! use canvas_tools::entities::{Entity, Lockable, User};
//!
//! let mut bob = User::default();
//! bob.set_name("Bob").unwrap();
//! let mut bill = User::default();
//! bill.set_name("Bill").unwrap();
//!
//! assert_eq!(bob, bill); // both have id 0
//! assert!(bob.compare_ordering(&bill).is_gt());
//!
//! bob.lock();
//! assert!(bob.set_name("Robert").is_err());
//! ```

mod course;
mod lockable;
mod term;
mod user;

use std::any::Any;
use std::cmp::Ordering;

use serde::{Deserialize, Deserializer};

use crate::canvas::Canvas;

pub use course::Course;
pub use lockable::{LockState, Lockable};
pub use term::Term;
pub use user::User;

/// Behavior shared by every Canvas entity.
pub trait Entity: Lockable + Any {
    /// Returns the entity's identifier.
    fn id(&self) -> u64;

    /// Returns the context this entity was retrieved through, if any.
    fn canvas(&self) -> Option<&Canvas>;

    /// Compares two entities by their sort field.
    fn compare_ordering(&self, other: &Self) -> Ordering
    where
        Self: Sized;

    /// Returns `true` if both entities have the same identity.
    fn compare_identity(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.id() == other.id()
    }

    /// Compares against an arbitrary, possibly absent, value.
    ///
    /// Anything that is not an entity of the same type sorts before this
    /// one, so the result is [`Ordering::Greater`].
    fn compare_to(&self, other: Option<&dyn Any>) -> Ordering
    where
        Self: Sized,
    {
        other
            .and_then(|other| other.downcast_ref::<Self>())
            .map_or(Ordering::Greater, |other| self.compare_ordering(other))
    }
}

/// Hands an entity over to a [`Canvas`]: binds it, then locks it.
pub(crate) trait Claim {
    fn claim(self, canvas: &Canvas) -> Self;
}

/// Deserializes `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
