//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use reqwest::header::HeaderValue;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// A validated, normalized base URL for a Canvas installation.
///
/// Canvas URLs are often copied with the API prefix attached. The prefix is
/// stripped once here so request paths can always be written as
/// `/api/v1/...` without duplicating it.
///
/// # Normalization
///
/// - One trailing `v1` segment is removed, then one trailing `api` segment
/// - Matching is case-insensitive and tolerates a trailing slash
/// - Query and fragment are dropped, and no trailing slash is kept
///
/// # Example
///
/// ```rust
/// use canvas_tools::BaseUrl;
///
/// let url = BaseUrl::new("https://canvas.example.edu/api/v1/").unwrap();
/// assert_eq!(url.as_ref(), "https://canvas.example.edu");
///
/// let hosted = BaseUrl::new("https://example.edu/hosted").unwrap();
/// assert_eq!(hosted.as_ref(), "https://example.edu/hosted");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new normalized base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is not absolute or
    /// cannot carry a path.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason,
        };

        let mut parsed = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }

        let mut segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        if segments.last().is_some_and(|s| s.eq_ignore_ascii_case("v1")) {
            segments.pop();
        }
        if segments.last().is_some_and(|s| s.eq_ignore_ascii_case("api")) {
            segments.pop();
        }
        let path = format!("/{}", segments.join("/"));

        parsed.set_path(&path);
        parsed.set_query(None);
        parsed.set_fragment(None);

        Ok(Self(parsed.as_str().trim_end_matches('/').to_string()))
    }

    /// Appends a relative request path to this base URL.
    ///
    /// Exactly one `/` separates the base and the path, so a hosted base path
    /// is preserved.
    ///
    /// # Example
    ///
    /// ```rust
    /// use canvas_tools::BaseUrl;
    ///
    /// let url = BaseUrl::new("http://example.edu/hosted").unwrap();
    /// assert_eq!(url.join("/api/v1/courses"), "http://example.edu/hosted/api/v1/courses");
    /// assert_eq!(url.join("api/v1/courses"), "http://example.edu/hosted/api/v1/courses");
    /// ```
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Canvas access token.
///
/// The token is sent as `Authorization: Bearer <token>`. It must be
/// non-empty and contain only characters that are legal in a header value.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use canvas_tools::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    header: HeaderValue,
}

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or
    /// whitespace, and [`ConfigError::InvalidAccessToken`] if it cannot be
    /// sent in a header.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }

        let mut header = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ConfigError::InvalidAccessToken)?;
        header.set_sensitive(true);

        Ok(Self { token, header })
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub const fn bearer_header(&self) -> &HeaderValue {
        &self.header
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
