//! Error types for scheduling API calls.
//!
//! Builders never fail on their own: every error here originates in the
//! transport or in client configuration. Transport failures reach the caller
//! of a terminal method (`get`, `book`, `cancel`) unchanged.

use http::{HeaderMap, StatusCode};

/// The error type returned by transports and client configuration.
///
/// # Examples
///
/// ```no_run
/// use bookwell::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// match client.services().at(1).get().await {
///     Ok(response) => println!("Services: {}", response.data),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("HTTP error {}: {}", status, raw_response);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS failure,
    /// configured timeout elapsed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    ///
    /// The raw body is preserved so callers can inspect what the API sent.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The API answered with a non-2xx status code.
    ///
    /// Validation failures for missing or malformed filters surface here,
    /// since builders send whatever subset of fields was set.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// Invalid client configuration, such as a missing base URL or a
    /// header value that cannot be sent.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookwell::Error;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let err = Error::HttpError {
    ///     status: StatusCode::UNPROCESSABLE_ENTITY,
    ///     raw_response: "{\"errors\":[]}".to_string(),
    ///     headers: HeaderMap::new(),
    /// };
    ///
    /// assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    /// assert_eq!(Error::ConfigurationError("x".into()).status(), None);
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns `true` if the API rejected the request as a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::HttpError { status, .. } if status.is_client_error())
    }
}

/// A specialized `Result` type for scheduling API calls.
pub type Result<T> = std::result::Result<T, Error>;
