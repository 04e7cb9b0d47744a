//! Request handling module that provides access to HTTP request information
//! and path parameters.
//!
//! The framework never defines its own request type: requests arrive as
//! `http::Request` and the dispatcher hands handlers a [`RequestContext`]
//! over the request head plus the [`PathParams`] captured by the router.

use http::request::Parts;
use http::{HeaderMap, Method, Uri, Version};

/// The context of an in-flight request: the request head and any path
/// parameters extracted from the matched route pattern.
pub struct RequestContext<'req> {
    head: &'req Parts,
    params: PathParams,
}

impl<'req> RequestContext<'req> {
    pub fn new(head: &'req Parts, params: PathParams) -> Self {
        Self { head, params }
    }

    /// Returns the underlying request head.
    pub fn head(&self) -> &Parts {
        self.head
    }

    pub fn method(&self) -> &Method {
        &self.head.method
    }

    pub fn uri(&self) -> &Uri {
        &self.head.uri
    }

    pub fn path(&self) -> &str {
        self.head.uri.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.head.uri.query()
    }

    pub fn version(&self) -> Version {
        self.head.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    /// Returns the path parameters captured from the matched route pattern.
    pub fn path_params(&self) -> &PathParams {
        &self.params
    }
}

/// Named path segments captured from the URL of a matched route.
///
/// For the pattern `/users/{id}`, a request for `/users/42` captures
/// `id → "42"`. Values are owned so handlers can hold on to them without
/// borrowing from the request.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    items: Vec<(String, String)>,
}

impl PathParams {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Gets the value of a path parameter by name.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        let name = name.as_ref();
        self.items.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<matchit::Params<'_, '_>> for PathParams {
    fn from(params: matchit::Params<'_, '_>) -> Self {
        Self { items: params.iter().map(|(key, value)| (key.to_owned(), value.to_owned())).collect() }
    }
}
