//! Response handling module that converts handler results into HTTP responses.
//!
//! This module provides the [`Responder`] trait which defines how different
//! types can be converted into HTTP responses. It includes implementations
//! for common types like Result, Option, String, etc., plus the [`Html`]
//! and [`Json`](crate::extract::Json) helpers that carry a content type.
//!
//! The [`Responder`] trait is a key part of the response pipeline, allowing
//! handler return values to be automatically converted into proper HTTP
//! responses.

use crate::body::ResponseBody;
use crate::error::WebError;
use crate::extract::Json;
use crate::request::RequestContext;
use http::{Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use tracing::error;

/// A trait for types that can be converted into HTTP responses.
///
/// Types implementing this trait can be returned directly from request
/// handlers and will be automatically converted into HTTP responses.
pub trait Responder {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody>;
}

/// Implementation for Result allows handlers to return Result types directly.
/// The Ok and Err variants must both implement Responder.
impl<T: Responder, E: Responder> Responder for Result<T, E> {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        match self {
            Ok(t) => t.response_to(req),
            Err(e) => e.response_to(req),
        }
    }
}

/// Implementation for Option allows handlers to return Option types.
/// None case returns an empty response.
impl<T: Responder> Responder for Option<T> {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        match self {
            Some(t) => t.response_to(req),
            None => Response::new(ResponseBody::empty()),
        }
    }
}

/// Implementation for Response allows passing through pre-built responses.
/// The response body is converted to the internal ResponseBody type.
impl<B> Responder for Response<B>
where
    B: Into<ResponseBody>,
{
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        self.map(|b| b.into())
    }
}

/// Implementation for (StatusCode, T) tuple allows setting a status code
/// along with the response content.
impl<T: Responder> Responder for (StatusCode, T) {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        let (status, responder) = self;
        let mut response = responder.response_to(req);
        *response.status_mut() = status;
        response
    }
}

/// Implementation for (T, StatusCode) tuple - same as above but with reversed order.
impl<T: Responder> Responder for (T, StatusCode) {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        let (responder, status) = self;
        (status, responder).response_to(req)
    }
}

/// Implementation for Box<T> allows boxing responders.
impl<T: Responder> Responder for Box<T> {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        (*self).response_to(req)
    }
}

/// Implementation for unit type () returns an empty response.
impl Responder for () {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        Response::new(ResponseBody::empty())
    }
}

/// A bare status code responds with an empty body.
impl Responder for StatusCode {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        let mut response = Response::new(ResponseBody::empty());
        *response.status_mut() = self;
        response
    }
}

/// Implementation for static strings returns them as plain text responses.
impl Responder for &'static str {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        text_response(ResponseBody::from(self))
    }
}

/// Implementation for String returns it as a plain text response.
impl Responder for String {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        text_response(ResponseBody::from(self))
    }
}

fn text_response(body: ResponseBody) -> Response<ResponseBody> {
    let mut builder = Response::builder();
    let headers = builder.headers_mut().unwrap();
    headers.reserve(8);
    headers.insert(http::header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref().parse().unwrap());

    builder.status(StatusCode::OK).body(body).unwrap()
}

/// An HTML response, `text/html` content type.
pub struct Html(pub String);

impl Responder for Html {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        let mut builder = Response::builder();
        let headers = builder.headers_mut().unwrap();
        headers.reserve(8);
        headers.insert(http::header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref().parse().unwrap());

        builder.status(StatusCode::OK).body(ResponseBody::from(self.0)).unwrap()
    }
}

/// Responding with [`Json`] serializes the wrapped value with serde_json
/// and sets the `application/json` content type.
impl<T: Serialize> Responder for Json<T> {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        match serde_json::to_vec(&self.0) {
            Ok(buf) => {
                let mut builder = Response::builder();
                let headers = builder.headers_mut().unwrap();
                headers.reserve(8);
                headers.insert(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref().parse().unwrap());

                builder.status(StatusCode::OK).body(ResponseBody::from(buf)).unwrap()
            }
            Err(e) => {
                error!(cause = %e, "failed to serialize json response");
                (StatusCode::INTERNAL_SERVER_ERROR, "json serialization error").response_to(req)
            }
        }
    }
}

/// Framework errors render as responses: client-input problems map to 400,
/// everything else to 500.
impl Responder for WebError {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        match self {
            WebError::InvalidBody { .. } => (StatusCode::BAD_REQUEST, "invalid body").response_to(req),
            WebError::InvalidQuery { .. } => (StatusCode::BAD_REQUEST, "invalid query string").response_to(req),
            WebError::Connection { .. } => (StatusCode::BAD_REQUEST, "connection error").response_to(req),
            WebError::Template { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "template error").response_to(req),
            WebError::NoTemplateEngine => {
                (StatusCode::INTERNAL_SERVER_ERROR, "no template engine configured").response_to(req)
            }
            WebError::BodyConsumed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "request body already consumed").response_to(req)
            }
            WebError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "io error").response_to(req),
        }
    }
}

impl Responder for Infallible {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        unreachable!()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PathParams;
    use http::Method;
    use http_body::Body as HttpBody;

    fn request_context(parts: &http::request::Parts) -> RequestContext<'_> {
        RequestContext::new(parts, PathParams::empty())
    }

    fn get_parts() -> http::request::Parts {
        let (parts, ()) = http::Request::builder().method(Method::GET).uri("/").body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn string_responds_as_plain_text() {
        let parts = get_parts();
        let response = "hello".to_string().response_to(&request_context(&parts));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(http::header::CONTENT_TYPE).unwrap(), mime::TEXT_PLAIN_UTF_8.as_ref());
        assert_eq!(response.body().size_hint().exact(), Some(5));
    }

    #[test]
    fn html_responds_with_html_content_type() {
        let parts = get_parts();
        let response = Html("<h1>hi</h1>".to_string()).response_to(&request_context(&parts));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(http::header::CONTENT_TYPE).unwrap(), mime::TEXT_HTML_UTF_8.as_ref());
    }

    #[test]
    fn json_responds_with_json_content_type() {
        let parts = get_parts();
        let response = Json(serde_json::json!({"name": "coral"})).response_to(&request_context(&parts));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(http::header::CONTENT_TYPE).unwrap(), mime::APPLICATION_JSON.as_ref());
    }

    #[test]
    fn status_tuple_overrides_status() {
        let parts = get_parts();
        let response = (StatusCode::NOT_FOUND, "Not Found!").response_to(&request_context(&parts));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get(http::header::CONTENT_TYPE).unwrap(), mime::TEXT_PLAIN_UTF_8.as_ref());
    }
}
