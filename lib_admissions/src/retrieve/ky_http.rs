//! # HTTP Retrieval Utilities
//!
//! An asynchronous API client wrapper around `reqwest`. It owns the base URL,
//! a set of default headers sent with every request, a request timeout and an
//! optional exponential backoff retry policy.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while building or executing a request.
///
/// A non-2xx status is not an error at this level; see [`ApiResponse::success`].
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The base URL or a joined path is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The underlying `reqwest::Client` could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, TLS, timeout or middleware failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The response body is not valid JSON for the requested type.
    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A standardized container for API responses.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The deserialized response body when the status was 2xx.
    pub data: Option<T>,
    /// The raw body returned by the server when the status was not 2xx.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
    /// The headers returned by the server.
    pub headers: HeaderMap,
}

/// Construction options for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientOptions {
    /// Upper bound for a single request, connection included.
    pub timeout: Duration,
    /// Retries on transient failures. `0` disables the retry middleware.
    pub max_retries: u32,
    /// Headers attached to every request.
    pub default_headers: HeaderMap,
}

impl Default for ApiClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 0,
            default_headers: HeaderMap::new(),
        }
    }
}

/// A flexible asynchronous HTTP client.
pub struct ApiClient {
    inner: ClientWithMiddleware,
    base_url: Url,
    default_headers: HeaderMap,
}

impl ApiClient {
    /// Creates a new `ApiClient` for an absolute `base_url`.
    ///
    /// # Errors
    /// Returns [`RetrieveError::Url`] if `base_url` is not absolute and
    /// [`RetrieveError::Client`] if the TLS backend cannot be initialised.
    pub fn new(base_url: &str, options: ApiClientOptions) -> Result<Self, RetrieveError> {
        let url = Url::parse(base_url)?;

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(RetrieveError::Client)?;

        let inner = if options.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(options.max_retries);
            ClientBuilder::new(client)
                .with(RetryTransientMiddleware::new_with_policy(retry_policy))
                .build()
        } else {
            ClientBuilder::new(client).build()
        };

        Ok(Self {
            inner,
            base_url: url,
            default_headers: options.default_headers,
        })
    }

    /// The absolute URL every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Performs a request and deserializes a 2xx body into `T`.
    ///
    /// An empty `path` targets the base URL itself. `headers` are applied after
    /// the client's default headers and win on conflicts.
    ///
    /// # Errors
    /// Transport failures, unreadable bodies and bodies that do not parse as
    /// `T` are errors. A non-2xx status is returned as `Ok` with
    /// `success == false` and the raw body in `error_body`.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse<T>, RetrieveError>
    where
        T: DeserializeOwned,
    {
        let full_url = self.base_url.join(path)?;
        let mut req = self
            .inner
            .request(method, full_url)
            .headers(self.default_headers.clone());

        if let Some(h) = headers {
            req = req.headers(h);
        }

        let response: reqwest::Response = req.send().await?;
        let status = response.status();
        let resp_headers = response.headers().clone();

        if status.is_success() {
            let body = response.text().await.map_err(RetrieveError::Body)?;
            let data = serde_json::from_str::<T>(&body)?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
                headers: resp_headers,
            })
        } else {
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
                headers: resp_headers,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_relative_base_url() {
        let result = ApiClient::new("api/data", ApiClientOptions::default());
        assert!(matches!(result, Err(RetrieveError::Url(_))));
    }

    #[tokio::test]
    async fn sends_default_headers_and_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .and(header("X-Client", "lib-admissions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let mut default_headers = HeaderMap::new();
        default_headers.insert("X-Client", HeaderValue::from_static("lib-admissions"));
        let options = ApiClientOptions {
            default_headers,
            ..ApiClientOptions::default()
        };
        let client = ApiClient::new(&format!("{}/api/data", server.uri()), options).unwrap();

        let response = client.request::<Value>(Method::GET, "", None).await.unwrap();
        assert!(response.success);
        assert_eq!(response.status, 200);
        assert_eq!(response.data, Some(json!({"ok": true})));
    }

    #[tokio::test]
    async fn non_success_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), ApiClientOptions::default()).unwrap();
        let response = client.request::<Value>(Method::GET, "", None).await.unwrap();

        assert!(!response.success);
        assert_eq!(response.status, 503);
        assert!(response.data.is_none());
        assert_eq!(response.error_body.as_deref(), Some("maintenance"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), ApiClientOptions::default()).unwrap();
        let result = client.request::<Value>(Method::GET, "", None).await;

        assert!(matches!(result, Err(RetrieveError::Parse(_))));
    }
}
