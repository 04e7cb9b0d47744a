//! Middleware: pre/post request processing hooks.
//!
//! A middleware sees the request before dispatch and the response after the
//! handler ran. The chain runs `on_request` in registration order and
//! `on_response` in reverse order, so the first registered middleware wraps
//! all the others.

use crate::body::{OptionReqBody, ResponseBody};
use crate::request::RequestContext;
use async_trait::async_trait;
use http::Response;
use tracing::info;

/// A pre/post request processing hook pair. Both hooks default to no-ops,
/// implementors override what they need.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn on_request(&self, _req: &mut RequestContext<'_>, _body: &mut OptionReqBody) {}

    async fn on_response(&self, _req: &RequestContext<'_>, _resp: &mut Response<ResponseBody>) {}
}

/// An ordered middleware stack, itself usable as a [`Middleware`].
pub struct MiddlewareChain {
    inner: Vec<Box<dyn Middleware>>,
}

#[async_trait]
impl Middleware for MiddlewareChain {
    async fn on_request(&self, req: &mut RequestContext<'_>, body: &mut OptionReqBody) {
        for middleware in self.inner.iter() {
            middleware.on_request(req, body).await;
        }
    }

    async fn on_response(&self, req: &RequestContext<'_>, resp: &mut Response<ResponseBody>) {
        for middleware in self.inner.iter().rev() {
            middleware.on_response(req, resp).await;
        }
    }
}

impl MiddlewareChain {
    pub fn builder() -> MiddlewareChainBuilder {
        MiddlewareChainBuilder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        MiddlewareChain::builder().build()
    }
}

pub struct MiddlewareChainBuilder {
    inner: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChainBuilder {
    fn new() -> Self {
        Self { inner: vec![] }
    }

    pub fn add_last<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.inner.push(Box::new(middleware));
        self
    }

    pub fn add_first<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.inner.insert(0, Box::new(middleware));
        self
    }

    pub fn build(self) -> MiddlewareChain {
        MiddlewareChain { inner: self.inner }
    }
}

/// Built-in middleware that logs every request and its response status.
pub struct RequestLogger;

#[async_trait]
impl Middleware for RequestLogger {
    async fn on_request(&self, req: &mut RequestContext<'_>, _body: &mut OptionReqBody) {
        info!(method = %req.method(), path = req.path(), "request received");
    }

    async fn on_response(&self, req: &RequestContext<'_>, resp: &mut Response<ResponseBody>) {
        info!(method = %req.method(), path = req.path(), status = %resp.status(), "request finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PathParams;
    use std::sync::{Arc, Mutex};

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Middleware for Recorder {
        async fn on_request(&self, _req: &mut RequestContext<'_>, _body: &mut OptionReqBody) {
            self.log.lock().unwrap().push(format!("{}:request", self.name));
        }

        async fn on_response(&self, _req: &RequestContext<'_>, _resp: &mut Response<ResponseBody>) {
            self.log.lock().unwrap().push(format!("{}:response", self.name));
        }
    }

    #[tokio::test]
    async fn chain_runs_hooks_in_onion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::builder()
            .add_last(Recorder { name: "outer", log: Arc::clone(&log) })
            .add_last(Recorder { name: "inner", log: Arc::clone(&log) })
            .build();

        let (parts, ()) = http::Request::builder().uri("/").body(()).unwrap().into_parts();
        let mut ctx = RequestContext::new(&parts, PathParams::empty());
        let mut body = OptionReqBody::empty();
        let mut response = Response::new(ResponseBody::empty());

        chain.on_request(&mut ctx, &mut body).await;
        chain.on_response(&ctx, &mut response).await;

        let log = log.lock().unwrap();
        assert_eq!(log.as_slice(), ["outer:request", "inner:request", "inner:response", "outer:response"]);
    }

    #[tokio::test]
    async fn add_first_prepends() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::builder()
            .add_last(Recorder { name: "second", log: Arc::clone(&log) })
            .add_first(Recorder { name: "first", log: Arc::clone(&log) })
            .build();

        assert_eq!(chain.len(), 2);

        let (parts, ()) = http::Request::builder().uri("/").body(()).unwrap().into_parts();
        let mut ctx = RequestContext::new(&parts, PathParams::empty());
        let mut body = OptionReqBody::empty();

        chain.on_request(&mut ctx, &mut body).await;

        let log = log.lock().unwrap();
        assert_eq!(log.as_slice(), ["first:request", "second:request"]);
    }
}
