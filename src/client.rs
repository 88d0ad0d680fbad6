//! HTTP transport for the scheduling API.
//!
//! The [`Client`] type holds connection settings and hands out resource
//! builders. Use [`ClientBuilder`] to configure and create clients.

use crate::{
    params::Params,
    request::query_pairs,
    resources::{Appointment, Service, TimeSlot},
    transport::Transport,
    Error, Response, Result,
};
use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// An HTTP client for the scheduling API.
///
/// The client is cheap to clone and meant to be reused: every builder it
/// creates holds a clone, and all of them share one connection pool.
///
/// # Examples
///
/// ```no_run
/// use bookwell::{Attendee, Client};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), bookwell::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com/api/v2/open/")?
///     .default_header("Authorization", "Bearer secret")?
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let services = client.services().at(1).get().await?;
/// println!("Services: {}", services.data);
///
/// let booked = client
///     .appointments()
///     .at(1)
///     .for_services(2)
///     .starting("2024-01-01T10:00:00-05:00")
///     .with(Attendee::new())
///     .book()
///     .await?;
/// println!("Booked: {}", booked.data);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Starts an appointment request.
    pub fn appointments(&self) -> Appointment<Client> {
        Appointment::new(self.clone())
    }

    /// Starts a service listing request.
    pub fn services(&self) -> Service<Client> {
        Service::new(self.clone())
    }

    /// Starts a time slot request.
    pub fn time_slots(&self) -> TimeSlot<Client> {
        TimeSlot::new(self.clone())
    }

    /// The base URL relative paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves a resource path against the base URL.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Executes a single request and parses the response.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&Params>,
        body: Option<&Value>,
    ) -> Result<Response<Value>> {
        let start_time = Instant::now();
        let mut url = self.url(path)?;

        if let Some(query) = query {
            let pairs = query_pairs(query);
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        tracing::debug!(
            method = %method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self.inner.http_client.request(method.clone(), url);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %method,
                    path = %path,
                    "Request failed"
                );
                return Err(e.into());
            }
        };

        self.parse_response(response, start_time.elapsed()).await
    }

    /// Parses the response body as JSON, treating an empty body as `null`.
    async fn parse_response(
        &self,
        response: reqwest::Response,
        latency: Duration,
    ) -> Result<Response<Value>> {
        let status = response.status();
        let headers = response.headers().clone();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        if !status.is_success() {
            let raw_response = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            }

            return Err(Error::HttpError {
                status,
                raw_response,
                headers,
            });
        }

        let raw_body = response.text().await?;

        if raw_body.trim().is_empty() {
            return Ok(Response::new(Value::Null, raw_body, status, headers, latency));
        }

        match serde_json::from_str::<Value>(&raw_body) {
            Ok(data) => Ok(Response::new(data, raw_body, status, headers, latency)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }
}

#[async_trait]
impl Transport for Client {
    async fn get(&self, path: &str, params: &Params) -> Result<Response<Value>> {
        self.execute(Method::GET, path, Some(params), None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Response<Value>> {
        self.execute(Method::POST, path, None, Some(body)).await
    }

    async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Response<Value>> {
        self.execute(Method::DELETE, path, None, body).await
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use bookwell::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), bookwell::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com/api/v2/open/")?
///     .timeout(Duration::from_secs(30))
///     .default_header("Accept-Language", "fr")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    ///
    /// JSON is requested and sent by default; there is no timeout.
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            http::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        Self {
            base_url: None,
            default_headers,
            timeout: None,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// Resource paths are joined onto it, so a base with a path prefix
    /// should end in `/`; one is appended if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let mut url = Url::parse(url.as_ref())?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or if the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_base_url() {
        let result = ClientBuilder::new().build();

        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ClientBuilder::new().base_url("not a url");

        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn invalid_header_is_rejected() {
        let result = ClientBuilder::new().default_header("bad header", "value");

        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn paths_resolve_under_the_base_path() {
        let client = Client::builder()
            .base_url("https://api.example.com/api/v2/open")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            client.url("appointments/1/2").unwrap().as_str(),
            "https://api.example.com/api/v2/open/appointments/1/2"
        );
        assert_eq!(
            client.url("/services").unwrap().as_str(),
            "https://api.example.com/api/v2/open/services"
        );
    }

    #[test]
    fn resource_builders_start_empty() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .unwrap()
            .build()
            .unwrap();

        assert!(client.services().request().query.is_empty());
        assert!(client.time_slots().request().query.is_empty());
        assert!(client.appointments().attendees().is_empty());
    }
}
