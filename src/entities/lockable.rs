//! The one-way lock shared by all entities.

use crate::error::EntityLockedError;

/// The lock state owned by an entity.
///
/// Starts unlocked and can only ever move to locked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockState {
    locked: bool,
}

impl LockState {
    /// Creates an unlocked state.
    #[must_use]
    pub const fn new() -> Self {
        Self { locked: false }
    }

    /// Returns `true` once the state has been locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Locks the state. Locking twice is a no-op.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Checks that a mutation is still allowed.
    ///
    /// # Errors
    ///
    /// Returns [`EntityLockedError`] if the state is locked.
    pub const fn guard(&self) -> Result<(), EntityLockedError> {
        if self.locked {
            Err(EntityLockedError)
        } else {
            Ok(())
        }
    }
}

/// An entity that can be frozen against further modification.
///
/// Every setter of a lockable entity fails with [`EntityLockedError`] once
/// [`lock`](Lockable::lock) has been called. There is no way back.
pub trait Lockable {
    /// Returns `true` if the entity has been locked.
    fn is_locked(&self) -> bool;

    /// Locks the entity.
    fn lock(&mut self);
}
