//! The application object: route table, middleware chain, template engine,
//! static mount and the dispatch pipeline tying them together.

use crate::body::{OptionReqBody, ReqBody, ResponseBody};
use crate::error::{BoxError, WebError};
use crate::handler::{RequestHandler, handler_fn};
use crate::middleware::{Middleware, MiddlewareChain, MiddlewareChainBuilder};
use crate::request::{PathParams, RequestContext};
use crate::router::{RouteItem, Router};
use crate::static_files::StaticFiles;
use crate::template::TemplateEngine;
use http::{Request, Response, StatusCode};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::error;

/// Hook invoked when a handler (or an extractor) fails; produces the
/// response sent to the client in place of the default 500.
pub type ExceptionHandler = dyn Fn(&RequestContext<'_>, BoxError) -> Response<ResponseBody> + Send + Sync;

/// An immutable application: everything is registered on the
/// [`AppBuilder`] and read-only once built.
pub struct App {
    router: Router,
    middleware: MiddlewareChain,
    templates: Option<Arc<TemplateEngine>>,
    static_files: Option<StaticFiles>,
    default_handler: Box<dyn RequestHandler>,
    exception_handler: Option<Box<ExceptionHandler>>,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Renders a template from the configured engine.
    pub fn template(&self, name: &str, ctx: impl Serialize) -> Result<String, WebError> {
        match &self.templates {
            Some(engine) => engine.render(name, ctx),
            None => Err(WebError::NoTemplateEngine),
        }
    }

    /// Dispatches one request through the full pipeline.
    ///
    /// Static-mount requests short-circuit before middleware: the
    /// middleware chain wraps routed requests only.
    pub async fn handle(&self, req: Request<ReqBody>) -> Response<ResponseBody> {
        if let Some(static_files) = &self.static_files {
            if static_files.matches(req.uri().path()) {
                return static_files.serve(req).await;
            }
        }

        let (parts, body) = req.into_parts();
        let mut req_body = OptionReqBody::from(body);

        let (matched, items, params) = match self.router.at(parts.uri.path()) {
            Some(route_match) => {
                let (items, params) = route_match.into_parts();
                (true, items, params)
            }
            None => (false, &[] as &[RouteItem], PathParams::empty()),
        };

        let mut ctx = RequestContext::new(&parts, params);

        self.middleware.on_request(&mut ctx, &mut req_body).await;

        let outcome = if matched {
            match items.iter().find(|item| item.filter().check(&ctx)) {
                Some(item) => item.handler().invoke(&ctx, req_body.clone()).await,
                None => Ok(method_not_allowed()),
            }
        } else {
            self.default_handler.invoke(&ctx, req_body.clone()).await
        };

        let mut response = match outcome {
            Ok(response) => response,
            Err(err) => match &self.exception_handler {
                Some(hook) => hook(&ctx, err),
                None => {
                    error!(cause = %err, "handler failed");
                    internal_server_error()
                }
            },
        };

        self.middleware.on_response(&ctx, &mut response).await;

        response
    }
}

fn method_not_allowed() -> Response<ResponseBody> {
    plain_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn internal_server_error() -> Response<ResponseBody> {
    plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

fn plain_response(status: StatusCode, body: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())
        .body(ResponseBody::from(body))
        .unwrap()
}

async fn default_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found!")
}

/// Collects routes, middleware, templates and static mounts, then builds
/// an immutable [`App`].
pub struct AppBuilder {
    router: Router,
    middleware: MiddlewareChainBuilder,
    templates: Option<Arc<TemplateEngine>>,
    static_files: Option<StaticFiles>,
    default_handler: Option<Box<dyn RequestHandler>>,
    exception_handler: Option<Box<ExceptionHandler>>,
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            router: Router::default(),
            middleware: MiddlewareChain::builder(),
            templates: None,
            static_files: None,
            default_handler: None,
            exception_handler: None,
        }
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    /// Appends a middleware to the chain.
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.add_last(middleware);
        self
    }

    /// Loads templates from a directory.
    pub fn templates_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.templates = Some(Arc::new(TemplateEngine::new(dir)));
        self
    }

    /// Shares a prepared template engine with the application.
    pub fn template_engine(mut self, engine: Arc<TemplateEngine>) -> Self {
        self.templates = Some(engine);
        self
    }

    /// Serves files from `dir` under the default `/static` prefix.
    pub fn static_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.static_files = Some(StaticFiles::new("/static", dir));
        self
    }

    /// Serves files from `dir` under a custom URL prefix.
    pub fn static_route(mut self, prefix: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        self.static_files = Some(StaticFiles::new(prefix, dir));
        self
    }

    /// Replaces the fixed 404 handler for unmatched routes.
    pub fn default_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(handler));
        self
    }

    /// Installs the hook invoked when a handler or extractor fails.
    pub fn exception_handler<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext<'_>, BoxError) -> Response<ResponseBody> + Send + Sync + 'static,
    {
        self.exception_handler = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> App {
        App {
            router: self.router,
            middleware: self.middleware.build(),
            templates: self.templates,
            static_files: self.static_files,
            default_handler: self.default_handler.unwrap_or_else(|| Box::new(handler_fn(default_not_found))),
            exception_handler: self.exception_handler,
        }
    }
}
