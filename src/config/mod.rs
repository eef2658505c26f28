//! Configuration types for the Canvas Tools library.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`BaseUrl`]: A validated, normalized Canvas installation URL
//! - [`AccessToken`]: A validated bearer token with masked debug output
//! - [`CanvasSettings`]: Settings loaded from a JSON settings file
//!
//! # Settings File
//!
//! Applications usually keep the Canvas URL and token in a JSON settings
//! file under a `canvas` section:
//!
//! ```json
//! {
//!   "canvas": {
//!     "url": "https://canvas.example.edu",
//!     "token": "1234~abcdef"
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use canvas_tools::CanvasSettings;
//!
//! let settings = CanvasSettings::from_json_str(
//!     r#"{"canvas": {"url": "https://canvas.example.edu/api/v1", "token": "abc"}}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.url().as_ref(), "https://canvas.example.edu");
//! let canvas = settings.into_builder().build();
//! ```

mod newtypes;

use std::path::Path;

use serde::Deserialize;

pub use newtypes::{AccessToken, BaseUrl};

use crate::canvas::CanvasBuilder;
use crate::error::ConfigError;

/// Canvas connection settings read from a settings document.
///
/// The token is optional; without one, requests are sent unauthenticated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasSettings {
    url: BaseUrl,
    token: Option<AccessToken>,
}

#[derive(Deserialize)]
struct SettingsDocument {
    canvas: CanvasSection,
}

#[derive(Deserialize)]
struct CanvasSection {
    url: BaseUrl,
    #[serde(default)]
    token: Option<String>,
}

impl CanvasSettings {
    /// Creates settings from already validated values.
    #[must_use]
    pub const fn new(url: BaseUrl, token: Option<AccessToken>) -> Self {
        Self { url, token }
    }

    /// Parses settings from a JSON document.
    ///
    /// An empty or whitespace-only token is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettings`] if the document is not valid
    /// JSON, lacks `canvas.url`, or holds an invalid URL or token.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let document: SettingsDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidSettings {
                reason: e.to_string(),
            })?;

        let token = match document.canvas.token {
            Some(token) if !token.trim().is_empty() => Some(AccessToken::new(token)?),
            _ => None,
        };

        Ok(Self {
            url: document.canvas.url,
            token,
        })
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SettingsUnreadable`] if the file cannot be read,
    /// or any error from [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_json_str(&contents)
    }

    /// Returns the Canvas base URL.
    #[must_use]
    pub const fn url(&self) -> &BaseUrl {
        &self.url
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Converts these settings into a [`CanvasBuilder`].
    #[must_use]
    pub fn into_builder(self) -> CanvasBuilder {
        let builder = CanvasBuilder::new(self.url);
        match self.token {
            Some(token) => builder.token(token),
            None => builder,
        }
    }
}

// Verify CanvasSettings is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CanvasSettings>();
};
