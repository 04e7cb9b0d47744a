//! An in-process test client.
//!
//! Feeds `http::Request`s straight into [`App::handle`] and collects the
//! response, so routing, middleware, templates and static files can be
//! exercised without binding a socket.
//!
//! ```rust,no_run
//! # use coral_web::router::{get, Router};
//! # use coral_web::testing::TestClient;
//! # use coral_web::{App, handler_fn};
//! # async fn hey() -> &'static str { "THIS IS COOL" }
//! # async fn run() {
//! let router = Router::builder().route("/hey", get(handler_fn(hey))).build();
//! let client = TestClient::new(App::builder().router(router).build());
//!
//! let response = client.get("/hey").await;
//! assert_eq!(response.text(), "THIS IS COOL");
//! # }
//! ```

use crate::app::App;
use crate::body::ReqBody;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub struct TestClient {
    app: Arc<App>,
}

impl TestClient {
    pub fn new(app: App) -> Self {
        Self { app: Arc::new(app) }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path).send().await
    }

    pub async fn post(&self, path: &str, body: impl Into<ReqBody>) -> TestResponse {
        self.request(Method::POST, path).body(body).send().await
    }

    /// Starts a request with full control over method, headers and body.
    pub fn request(&self, method: Method, path: &str) -> TestRequestBuilder<'_> {
        TestRequestBuilder {
            client: self,
            method,
            path: path.to_owned(),
            headers: HeaderMap::new(),
            body: ReqBody::empty(),
        }
    }
}

pub struct TestRequestBuilder<'client> {
    client: &'client TestClient,
    method: Method,
    path: String,
    headers: HeaderMap,
    body: ReqBody,
}

impl TestRequestBuilder<'_> {
    /// # Panics
    ///
    /// Panics on an invalid header name or value; test inputs are expected
    /// to be well formed.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name = HeaderName::from_bytes(name.as_bytes()).expect("invalid header name");
        let value = HeaderValue::from_str(value).expect("invalid header value");
        self.headers.insert(name, value);
        self
    }

    pub fn content_type(self, value: &str) -> Self {
        self.header("content-type", value)
    }

    pub fn body(mut self, body: impl Into<ReqBody>) -> Self {
        self.body = body.into();
        self
    }

    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.path);
        builder.headers_mut().expect("invalid test request").extend(self.headers);
        let request = builder.body(self.body).expect("invalid test request");

        let response = self.client.app.handle(request).await;
        let (parts, body) = response.into_parts();
        let body = body.collect().await.expect("failed to collect response body").to_bytes();

        TestResponse { status: parts.status, headers: parts.headers, body }
    }
}

pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The named header as a string, `None` when absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// # Panics
    ///
    /// Panics when the body is not valid json for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("response body is not valid json")
    }
}
