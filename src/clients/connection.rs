//! HTTP connection to a Canvas installation.
//!
//! This module provides the [`Connection`] type, which turns a relative
//! resource path into single-entity or paginated retrieval.

use std::collections::HashMap;
use std::future::Future;

use async_stream::try_stream;
use futures_util::Stream;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, Dispatch};
use url::Url;

use crate::clients::errors::{DecodeError, HttpError, HttpResponseError};
use crate::clients::http_response::HttpResponse;
use crate::clients::list_options::{ListOptions, ProgressUpdate};
use crate::clients::parameters::Parameters;
use crate::config::{AccessToken, BaseUrl};
use crate::logging::{emit, short_type_name};

/// Library version from Cargo.toml.
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A connection to a Canvas installation that uses HTTP REST calls.
///
/// The connection handles:
/// - Base URL normalization (via [`BaseUrl`])
/// - Default headers including `Accept`, `User-Agent` and the bearer token
/// - Single-entity retrieval where 404 means "not found"
/// - Lazy multi-page listing following the `Link: <...>; rel="next"` header
/// - Cooperative cancellation through a [`CancellationToken`]
///
/// Nothing is retried: every transport failure or non-success status is
/// returned to the caller immediately.
///
/// # Thread Safety
///
/// `Connection` is `Clone + Send + Sync`. Clones share the underlying
/// `reqwest` connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use canvas_tools::clients::{Connection, Parameters};
/// use canvas_tools::{BaseUrl, Course};
///
/// let connection = Connection::new(BaseUrl::new("https://canvas.example.edu")?, None, None);
/// let course: Option<Course> = connection
///     .retrieve("/api/v1/courses/42", &Parameters::new(), None)
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct Connection {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Normalized base URL (e.g., `https://canvas.example.edu`).
    base_url: BaseUrl,
    /// Headers sent with every request.
    default_headers: HeaderMap,
    /// Logger for request and page events.
    logger: Option<Dispatch>,
}

// Verify Connection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Connection>();
};

impl Connection {
    /// Creates a new connection.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The normalized base URL of the Canvas installation
    /// * `token` - Optional bearer token sent in the `Authorization` header
    /// * `client` - Optional `reqwest` client to use as the transport
    ///
    /// The default headers are attached to each request rather than to the
    /// client, so a caller-supplied client receives them too.
    ///
    /// # Panics
    ///
    /// Panics if no client was supplied and the underlying reqwest client
    /// cannot be created. This should only happen in extremely unusual
    /// circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(
        base_url: BaseUrl,
        token: Option<&AccessToken>,
        client: Option<reqwest::Client>,
    ) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("Canvas Tools Library v{LIB_VERSION} | Rust {rust_version}");

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&user_agent) {
            default_headers.insert(USER_AGENT, value);
        }
        if let Some(token) = token {
            default_headers.insert(AUTHORIZATION, token.bearer_header().clone());
        }

        let client = client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .expect("Failed to create HTTP client")
        });

        Self {
            client,
            base_url,
            default_headers,
            logger: None,
        }
    }

    /// Sets the logger this connection emits its events through.
    #[must_use]
    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Returns the underlying `reqwest` client.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Returns the configured logger, if any.
    #[must_use]
    pub const fn logger(&self) -> Option<&Dispatch> {
        self.logger.as_ref()
    }

    /// Retrieves a single entity.
    ///
    /// The request URL is `path` plus the encoded `parameters`, resolved
    /// against the base URL.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the server answered 404 or sent a `null` body, otherwise
    /// the decoded entity.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The response status is neither 2xx nor 404 (`Response`)
    /// - The body is not valid JSON for `T` (`Decode`)
    /// - The cancellation token fires before completion (`Cancelled`)
    /// - A network error occurs (`Network`)
    pub async fn retrieve<T>(
        &self,
        path: &str,
        parameters: &Parameters,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<T>, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self.resolve(&format!("{path}{parameters}"))?;
        let kind = short_type_name::<T>();
        self.log(|| debug!(url = %url, "Retrieving {kind} entity"));

        let response = self.get(&url, cancel).await?;
        if response.is_not_found() {
            self.log(|| debug!(url = %url, "{kind} entity not found"));
            return Ok(None);
        }
        Self::ensure_success(&response, &url)?;

        let item: Option<T> = Self::decode(&response, &url)?;
        Ok(item)
    }

    /// Lists entities, following the server's pagination links.
    ///
    /// The returned stream is lazy: each page is requested only once the
    /// items of the previous page have been consumed. It ends when a page
    /// has no `next` link, when `options` hits its page limit, or when the
    /// progress callback asks to stop. It cannot be restarted; call `list`
    /// again to iterate a second time.
    ///
    /// Relative `next` links are resolved against the page they came from.
    /// A `null` page body counts as an empty page.
    ///
    /// # Errors
    ///
    /// The stream yields one `Err` and then ends if:
    /// - Any page returns a non-2xx status, 404 included (`Response`)
    /// - A page body is not a JSON array of `T` (`Decode`)
    /// - The cancellation token fires during a request (`Cancelled`)
    /// - A network error occurs (`Network`)
    ///
    /// Items from earlier pages have already been yielded by then.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use futures_util::TryStreamExt;
    ///
    /// let courses: Vec<Course> = connection
    ///     .list("api/v1/courses", &Parameters::new(), ListOptions::new().max_pages(3), None)
    ///     .try_collect()
    ///     .await?;
    /// ```
    pub fn list<T>(
        &self,
        path: &str,
        parameters: &Parameters,
        options: ListOptions,
        cancel: Option<CancellationToken>,
    ) -> impl Stream<Item = Result<T, HttpError>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let connection = self.clone();
        let start = format!("{path}{parameters}");

        try_stream! {
            let kind = short_type_name::<T>();
            let mut next_url = Some(connection.resolve(&start)?);
            let mut item_count = 0;
            let mut page_count = 0;

            while let Some(url) = next_url.take() {
                if options.limit_reached(page_count) {
                    connection.log(|| debug!(page_count, "Stopping {kind} listing at page limit"));
                    break;
                }

                connection.log(|| debug!(url = %url, page = page_count + 1, "Retrieving page of {kind} entities"));

                let response = connection.get(&url, cancel.as_ref()).await?;
                Connection::ensure_success(&response, &url)?;
                let items: Option<Vec<T>> = Connection::decode(&response, &url)?;
                next_url = response.next_link().map(|link| url.join(link)).transpose()?;

                for item in items.unwrap_or_default() {
                    item_count += 1;
                    yield item;
                }

                page_count += 1;
                connection.log(|| debug!(item_count, page_count, "Retrieved page of {kind} entities"));

                if options.report(ProgressUpdate { item_count, page_count }) {
                    connection.log(|| debug!(item_count, page_count, "{kind} listing stopped by progress callback"));
                    break;
                }
            }
        }
    }

    /// Resolves a caller-supplied request target against the base URL.
    ///
    /// Absolute URLs are used as they are.
    fn resolve(&self, target: &str) -> Result<Url, HttpError> {
        match Url::parse(target) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Url::parse(&self.base_url.join(target))?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Sends a GET request, racing it against the cancellation token.
    async fn get(
        &self,
        url: &Url,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse, HttpError> {
        let request = self
            .client
            .get(url.clone())
            .headers(self.default_headers.clone());

        let exchange = async move {
            let res = request.send().await?;
            let code = res.status().as_u16();
            let headers = Self::parse_response_headers(res.headers());
            let body = res.text().await?;
            Ok::<_, HttpError>(HttpResponse::new(code, headers, body))
        };

        cancellable(cancel, exchange).await
    }

    fn ensure_success(response: &HttpResponse, url: &Url) -> Result<(), HttpResponseError> {
        if response.is_ok() {
            return Ok(());
        }

        let body = response.body.trim();
        let message = if body.is_empty() {
            reqwest::StatusCode::from_u16(response.code)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            body.to_string()
        };

        Err(HttpResponseError {
            code: response.code,
            message,
            url: url.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(response: &HttpResponse, url: &Url) -> Result<T, DecodeError> {
        serde_json::from_str(&response.body).map_err(|source| DecodeError {
            url: url.to_string(),
            source,
        })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn log(&self, event: impl FnOnce()) {
        emit(self.logger.as_ref(), event);
    }
}

/// Runs `operation`, failing with [`HttpError::Cancelled`] if `cancel` fires first.
async fn cancellable<T, F>(cancel: Option<&CancellationToken>, operation: F) -> Result<T, HttpError>
where
    F: Future<Output = Result<T, HttpError>>,
{
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => Err(HttpError::Cancelled),
                result = operation => result,
            }
        }
        None => operation.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_connection(token: Option<&str>) -> Connection {
        let token = token.map(|t| AccessToken::new(t).unwrap());
        Connection::new(
            BaseUrl::new("http://127.0.0.1/api/v1").unwrap(),
            token.as_ref(),
            None,
        )
    }

    #[test]
    fn test_connection_normalizes_base_url() {
        let connection = create_test_connection(None);
        assert_eq!(connection.base_url().as_ref(), "http://127.0.0.1");
    }

    #[test]
    fn test_accept_header_is_json() {
        let connection = create_test_connection(None);
        assert_eq!(
            connection.default_headers().get(ACCEPT).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let connection = create_test_connection(None);
        let user_agent = connection
            .default_headers()
            .get(USER_AGENT)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(user_agent.contains("Canvas Tools Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_authorization_header_injection() {
        let connection = create_test_connection(Some("test-token"));
        let header = connection.default_headers().get(AUTHORIZATION).unwrap();
        assert_eq!(header, "Bearer test-token");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_no_authorization_header_without_token() {
        let connection = create_test_connection(None);
        assert!(connection.default_headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_resolve_relative_paths() {
        let connection = create_test_connection(None);
        assert_eq!(
            connection.resolve("api/v1/courses").unwrap().as_str(),
            "http://127.0.0.1/api/v1/courses"
        );
        assert_eq!(
            connection.resolve("/api/v1/courses/1?include[]=term").unwrap().as_str(),
            "http://127.0.0.1/api/v1/courses/1?include[]=term"
        );
    }

    #[test]
    fn test_resolve_keeps_hosted_base_path() {
        let connection = Connection::new(
            BaseUrl::new("http://canvas.com/hosted/api").unwrap(),
            None,
            None,
        );
        assert_eq!(
            connection.resolve("/api/v1/users/self").unwrap().as_str(),
            "http://canvas.com/hosted/api/v1/users/self"
        );
    }

    #[test]
    fn test_resolve_uses_absolute_urls_as_is() {
        let connection = create_test_connection(None);
        assert_eq!(
            connection
                .resolve("http://other.host/api/v1/courses?page=2")
                .unwrap()
                .as_str(),
            "http://other.host/api/v1/courses?page=2"
        );
    }

    #[test]
    fn test_ensure_success_uses_reason_for_empty_body() {
        let url = Url::parse("http://127.0.0.1/api/v1/courses").unwrap();
        let response = HttpResponse::new(401, HashMap::new(), String::new());
        let error = Connection::ensure_success(&response, &url).unwrap_err();

        assert_eq!(error.code, 401);
        assert_eq!(error.message, "Unauthorized");
        assert_eq!(error.url, "http://127.0.0.1/api/v1/courses");
    }

    #[test]
    fn test_ensure_success_uses_body_when_present() {
        let url = Url::parse("http://127.0.0.1/api/v1/courses").unwrap();
        let body = r#"{"errors":[{"message":"Invalid access token."}]}"#;
        let response = HttpResponse::new(401, HashMap::new(), body.to_string());
        let error = Connection::ensure_success(&response, &url).unwrap_err();

        assert_eq!(error.message, body);
    }

    #[test]
    fn test_non_ascii_link_header_keeps_next_link() {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::LINK,
            HeaderValue::from_bytes(b"<http://127.0.0.1/api/v1/courses?page=2>; rel=\"next\"; title=\"caf\xe9\"")
                .unwrap(),
        );

        let parsed = Connection::parse_response_headers(&headers);
        let response = HttpResponse::new(200, parsed, "[]".to_string());
        assert_eq!(
            response.next_link(),
            Some("http://127.0.0.1/api/v1/courses?page=2")
        );
    }

    #[tokio::test]
    async fn test_cancellable_reports_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<(), HttpError> =
            cancellable(Some(&token), std::future::pending()).await;
        assert!(matches!(result, Err(HttpError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let token = CancellationToken::new();
        let result = cancellable(Some(&token), async { Ok::<_, HttpError>(7) }).await;
        assert_eq!(result.unwrap(), 7);

        let result = cancellable(None, async { Ok::<_, HttpError>(8) }).await;
        assert_eq!(result.unwrap(), 8);
    }

    #[test]
    fn test_connection_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Connection>();
    }
}
