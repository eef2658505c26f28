//! Builder for [`Canvas`] instances.

use tracing::{info, Dispatch};

use crate::canvas::Canvas;
use crate::clients::Connection;
use crate::config::{AccessToken, BaseUrl};
use crate::logging::emit;

/// An immutable builder for [`Canvas`].
///
/// Every configuration method leaves its receiver untouched and returns a
/// new builder, so a partially configured builder can be shared and
/// specialized.
///
/// # Example
///
/// ```rust
/// use canvas_tools::{AccessToken, BaseUrl, Canvas};
///
/// let anonymous = Canvas::builder(BaseUrl::new("https://canvas.example.edu/api/v1").unwrap());
/// let signed_in = anonymous.token(AccessToken::new("1234~abcdef").unwrap());
///
/// let canvas = signed_in.build();
/// assert_eq!(canvas.connection().base_url().as_ref(), "https://canvas.example.edu");
/// assert!(anonymous.build().connection().default_headers().get("authorization").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct CanvasBuilder {
    base_url: BaseUrl,
    client: Option<reqwest::Client>,
    token: Option<AccessToken>,
    logger: Option<Dispatch>,
}

impl CanvasBuilder {
    /// Creates a builder for the installation at `base_url`.
    #[must_use]
    pub const fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            client: None,
            token: None,
            logger: None,
        }
    }

    /// Uses a caller-supplied HTTP client as the transport.
    ///
    /// The default headers are still sent with every request.
    #[must_use]
    pub fn http_client(&self, client: reqwest::Client) -> Self {
        Self {
            client: Some(client),
            ..self.clone()
        }
    }

    /// Sends `token` as a bearer token with every request.
    #[must_use]
    pub fn token(&self, token: AccessToken) -> Self {
        Self {
            token: Some(token),
            ..self.clone()
        }
    }

    /// Emits the library's log events through `logger`.
    ///
    /// Without a logger, events go to the process-wide default subscriber.
    #[must_use]
    pub fn logger(&self, logger: Dispatch) -> Self {
        Self {
            logger: Some(logger),
            ..self.clone()
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the configured access token, if any.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Builds the [`Canvas`] instance.
    ///
    /// # Panics
    ///
    /// Panics if no HTTP client was supplied and the default one cannot be
    /// created. See [`Connection::new`].
    #[must_use]
    pub fn build(&self) -> Canvas {
        emit(self.logger.as_ref(), || {
            info!("Building Canvas instance");
            info!("Base URL is {}", self.base_url);
        });

        let mut connection =
            Connection::new(self.base_url.clone(), self.token.as_ref(), self.client.clone());
        if let Some(logger) = &self.logger {
            connection = connection.with_logger(logger.clone());
        }

        Canvas::new(connection)
    }
}
