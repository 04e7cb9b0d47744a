pub mod filter;

use crate::handler::RequestHandler;
use crate::request::PathParams;

use filter::{AllFilter, Filter};
use std::collections::HashMap;
use tracing::debug;

type InnerRouter<T> = matchit::Router<T>;

/// Main router structure that handles HTTP request routing.
///
/// Patterns use the matchit syntax: literal segments, named captures
/// (`/home/{name}`) and catch-alls (`/files/{*rest}`). Each pattern owns an
/// ordered list of filtered handlers; the dispatcher picks the first one
/// whose filter passes.
pub struct Router {
    inner: InnerRouter<RouteEntry>,
}

struct RouteEntry {
    items: Vec<RouteItem>,
}

/// One `(filter, handler)` binding under a route pattern.
pub struct RouteItem {
    filter: AllFilter,
    handler: Box<dyn RequestHandler>,
}

/// Result of matching a path: the pattern's bindings plus the captured
/// path parameters.
pub struct RouteMatch<'router> {
    items: &'router [RouteItem],
    params: PathParams,
}

impl Router {
    /// Creates a new router builder
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Matches a path against the router's routes.
    ///
    /// Returns `None` when no pattern matches; the dispatcher then falls
    /// back to its default (404) handler.
    pub fn at(&self, path: &str) -> Option<RouteMatch<'_>> {
        match self.inner.at(path) {
            Ok(matched) => {
                Some(RouteMatch { items: matched.value.items.as_slice(), params: matched.params.into() })
            }
            Err(e) => {
                debug!("no route matched '{}': {}", path, e);
                None
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Router::builder().build()
    }
}

impl RouteItem {
    /// Gets the filter for this binding
    pub fn filter(&self) -> &dyn Filter {
        &self.filter
    }

    /// Gets the request handler for this binding
    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

impl<'router> RouteMatch<'router> {
    /// Gets the matched bindings
    pub fn items(&self) -> &'router [RouteItem] {
        self.items
    }

    /// Gets the path parameters captured from the matched route
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn into_parts(self) -> (&'router [RouteItem], PathParams) {
        (self.items, self.params)
    }
}

/// Collects route registrations and builds an immutable [`Router`].
pub struct RouterBuilder {
    data: HashMap<String, RouteBuilder>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { data: HashMap::new() }
    }

    /// Registers a route pattern with its bindings.
    ///
    /// # Panics
    ///
    /// Panics when the pattern was already registered; each pattern must be
    /// registered exactly once, with all of its method bindings attached to
    /// one [`RouteBuilder`].
    pub fn route(mut self, pattern: impl Into<String>, route: RouteBuilder) -> Self {
        let pattern = pattern.into();
        let previous = self.data.insert(pattern.clone(), route);
        assert!(previous.is_none(), "route pattern '{pattern}' registered twice");
        self
    }

    /// Builds the router from the accumulated routes.
    ///
    /// # Panics
    ///
    /// Panics when a pattern is rejected by the underlying matcher, e.g. a
    /// catch-all in the middle of a pattern or two patterns whose captures
    /// conflict.
    pub fn build(self) -> Router {
        let mut inner = InnerRouter::new();

        for (pattern, route) in self.data.into_iter() {
            let entry = RouteEntry { items: route.items };
            inner
                .insert(pattern.clone(), entry)
                .unwrap_or_else(|e| panic!("invalid route pattern '{pattern}': {e}"));
        }

        Router { inner }
    }
}

macro_rules! method_route {
    ($method:ident) => {
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouteBuilder {
            RouteBuilder::new().$method(handler)
        }
    };
}

method_route!(get);
method_route!(post);
method_route!(put);
method_route!(delete);
method_route!(head);
method_route!(options);
method_route!(connect);
method_route!(patch);
method_route!(trace);

/// Binds a handler that accepts every method.
pub fn any<H: RequestHandler + 'static>(handler: H) -> RouteBuilder {
    RouteBuilder::new().any(handler)
}

/// The bindings of a single route pattern.
///
/// Bindings chain, so one pattern can answer several methods:
///
/// ```no_run
/// # use coral_web::router::{get, Router};
/// # use coral_web::handler_fn;
/// # async fn list() -> &'static str { "list" }
/// # async fn create() -> &'static str { "create" }
/// let router = Router::builder()
///     .route("/book", get(handler_fn(list)).post(handler_fn(create)))
///     .build();
/// ```
pub struct RouteBuilder {
    items: Vec<RouteItem>,
}

macro_rules! method_binding {
    ($method:ident, $method_filter:ident) => {
        pub fn $method<H: RequestHandler + 'static>(mut self, handler: H) -> Self {
            let mut filters = filter::all_filter();
            filters.and(filter::$method_filter());
            self.items.push(RouteItem { filter: filters, handler: Box::new(handler) });
            self
        }
    };
}

impl RouteBuilder {
    fn new() -> Self {
        Self { items: vec![] }
    }

    method_binding!(get, get_method);
    method_binding!(post, post_method);
    method_binding!(put, put_method);
    method_binding!(delete, delete_method);
    method_binding!(head, head_method);
    method_binding!(options, options_method);
    method_binding!(connect, connect_method);
    method_binding!(patch, patch_method);
    method_binding!(trace, trace_method);

    /// Binds a handler without a method filter.
    pub fn any<H: RequestHandler + 'static>(mut self, handler: H) -> Self {
        self.items.push(RouteItem { filter: filter::all_filter(), handler: Box::new(handler) });
        self
    }

    /// Refines the most recently added binding with an extra filter.
    ///
    /// # Panics
    ///
    /// Panics when no binding was added yet.
    pub fn with<F: Filter + 'static>(mut self, extra: F) -> Self {
        let item = self.items.last_mut().expect("no handler bound yet");
        item.filter.and(extra);
        self
    }
}
