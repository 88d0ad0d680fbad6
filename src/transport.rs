//! The transport seam between builders and the network.
//!
//! Builders only ever talk to a [`Transport`]. [`Client`](crate::Client) is the
//! HTTP implementation; [`MockTransport`] records requests instead of sending
//! them, which makes it the tool of choice for testing code built on top of
//! the builders.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::params::Params;
use crate::request::RequestDescriptor;
use crate::{Error, Response, Result};

/// Issues requests against the scheduling API.
///
/// Implementations own base URL handling, authentication headers and
/// timeouts. Whatever they return is handed to the caller of the terminal
/// builder method unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET request with the given query parameters.
    async fn get(&self, path: &str, params: &Params) -> Result<Response<Value>>;

    /// Sends a POST request with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Response<Value>>;

    /// Sends a DELETE request, optionally carrying a JSON body.
    async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Response<Value>>;

    /// Dispatches a descriptor to the matching method.
    async fn send(&self, request: RequestDescriptor) -> Result<Response<Value>> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            query_params = request.query.len(),
            has_body = request.body.is_some(),
            "Dispatching request"
        );

        if request.method == Method::GET {
            self.get(&request.path, &request.query).await
        } else if request.method == Method::POST {
            let body = request
                .body
                .unwrap_or_else(|| Value::Object(Default::default()));
            self.post(&request.path, &body).await
        } else if request.method == Method::DELETE {
            self.delete(&request.path, request.body.as_ref()).await
        } else {
            Err(Error::ConfigurationError(format!(
                "Unsupported method: {}",
                request.method
            )))
        }
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, path: &str, params: &Params) -> Result<Response<Value>> {
        (**self).get(path, params).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Response<Value>> {
        (**self).post(path, body).await
    }

    async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Response<Value>> {
        (**self).delete(path, body).await
    }
}

/// A transport that records every request and answers from a queue.
///
/// Clones share the same log and queue, so a test can hand one clone to a
/// builder and inspect the other. When the queue is empty every request is
/// answered with `200 OK` and a `null` body.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<RequestDescriptor>>>,
    responses: Arc<Mutex<VecDeque<Result<Response<Value>>>>>,
}

impl MockTransport {
    /// Creates a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response carrying `data`.
    pub fn respond_with(&self, data: Value) -> &Self {
        let raw_body = data.to_string();
        self.push(Ok(Response::new(
            data,
            raw_body,
            StatusCode::OK,
            HeaderMap::new(),
            Duration::ZERO,
        )))
    }

    /// Queues an error; the next request fails with it.
    pub fn fail_with(&self, error: Error) -> &Self {
        self.push(Err(error))
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.lock_requests().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.lock_requests().last().cloned()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.lock_requests().len()
    }

    fn push(&self, response: Result<Response<Value>>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
        self
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<RequestDescriptor>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, request: RequestDescriptor) -> Result<Response<Value>> {
        self.lock_requests().push(request);

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        next.unwrap_or_else(|| {
            Ok(Response::new(
                Value::Null,
                String::new(),
                StatusCode::OK,
                HeaderMap::new(),
                Duration::ZERO,
            ))
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, params: &Params) -> Result<Response<Value>> {
        self.record(RequestDescriptor::get(path, params.clone()))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Response<Value>> {
        self.record(RequestDescriptor::post(path, body.clone()))
    }

    async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Response<Value>> {
        let mut request = RequestDescriptor::new(Method::DELETE, path);
        request.body = body.cloned();
        self.record(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn mock_records_requests_in_order() {
        let transport = MockTransport::new();

        transport.get("services", &Params::new()).await.unwrap();
        transport.post("appointments", &json!({})).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[1].path, "appointments");
        assert_eq!(requests[1].body, Some(json!({})));
    }

    #[tokio::test]
    async fn mock_answers_from_queue_then_defaults() {
        let transport = MockTransport::new();
        transport.respond_with(json!({"data": []}));

        let first = transport.get("times", &Params::new()).await.unwrap();
        let second = transport.get("times", &Params::new()).await.unwrap();

        assert_eq!(first.data, json!({"data": []}));
        assert_eq!(second.data, Value::Null);
        assert_eq!(second.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn mock_returns_queued_errors() {
        let transport = MockTransport::new();
        transport.fail_with(Error::HttpError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            raw_response: "invalid".to_string(),
            headers: HeaderMap::new(),
        });

        let err = transport.post("appointments", &json!({})).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn send_dispatches_on_method() {
        let transport = MockTransport::new();

        transport
            .send(RequestDescriptor::delete("appointments/1/2", json!({"source": "web"})))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "appointments/1/2");
        assert_eq!(request.body, Some(json!({"source": "web"})));
    }

    #[tokio::test]
    async fn send_rejects_unsupported_methods() {
        let transport = MockTransport::new();

        let result = transport
            .send(RequestDescriptor::new(Method::PATCH, "appointments"))
            .await;

        assert!(matches!(result, Err(Error::ConfigurationError(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn shared_transport_forwards_calls() {
        let mock = MockTransport::new();
        let shared: Arc<dyn Transport> = Arc::new(mock.clone());

        shared.get("services", &Params::new()).await.unwrap();

        assert_eq!(mock.request_count(), 1);
    }
}
