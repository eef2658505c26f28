//! Error types for the Canvas Tools library.
//!
//! This module contains the configuration errors raised while validating
//! settings and newtypes, and the error raised when a locked entity is
//! modified.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Entity setters return `Result<(), EntityLockedError>`.
//! Connection failures are reported through [`HttpError`](crate::clients::HttpError).
//!
//! # Example
//!
//! ```rust
//! use canvas_tools::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during library configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("Invalid base URL '{url}': {reason}. Please provide an absolute URL (e.g., 'https://canvas.example.edu').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// The access token is empty.
    #[error("Access token cannot be empty. Please provide a valid Canvas access token.")]
    EmptyAccessToken,

    /// The access token contains characters that cannot be sent in a header.
    #[error("Access token contains characters that are not allowed in an HTTP header.")]
    InvalidAccessToken,

    /// The settings file could not be read.
    #[error("Unable to read settings from '{path}': {reason}")]
    SettingsUnreadable {
        /// The path that was read.
        path: String,
        /// The underlying I/O failure.
        reason: String,
    },

    /// The settings document is not valid.
    #[error("Invalid settings: {reason}")]
    InvalidSettings {
        /// The reason the settings are invalid.
        reason: String,
    },
}

/// Error returned when a locked entity is being modified.
///
/// Entities handed out by a [`Canvas`](crate::Canvas) are always locked.
/// Attempting to change one of their fields is a programming error.
///
/// # Example
///
/// ```rust
/// use canvas_tools::entities::{Lockable, User};
/// use canvas_tools::EntityLockedError;
///
/// let mut user = User::default();
/// user.lock();
///
/// assert_eq!(user.set_name("Bob"), Err(EntityLockedError));
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("This entity has been locked")]
pub struct EntityLockedError;
