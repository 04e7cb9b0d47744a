//! Static file serving, delegated to tower-http's `ServeDir`.
//!
//! Requests under the mount prefix bypass routing and middleware entirely;
//! the prefix is stripped and the remainder resolved inside the directory.
//! `ServeDir` answers 404 for missing files and rejects path traversal.

use crate::body::{ReqBody, ResponseBody};
use crate::error::WebError;
use http::{Request, Response, StatusCode, Uri};
use http_body_util::BodyExt;
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::error;

pub(crate) struct StaticFiles {
    prefix: String,
    serve_dir: ServeDir,
}

impl StaticFiles {
    pub(crate) fn new(prefix: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.starts_with('/') {
            prefix.insert(0, '/');
        }
        while prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix, serve_dir: ServeDir::new(dir) }
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix.as_str()).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    pub(crate) async fn serve(&self, req: Request<ReqBody>) -> Response<ResponseBody> {
        let (mut parts, body) = req.into_parts();

        let stripped = parts.uri.path().strip_prefix(self.prefix.as_str()).unwrap_or("");
        let target = if stripped.is_empty() { "/" } else { stripped };
        parts.uri = match Uri::try_from(target) {
            Ok(uri) => uri,
            Err(_) => return status_response(StatusCode::NOT_FOUND),
        };

        let req = Request::from_parts(parts, body);
        match self.serve_dir.clone().oneshot(req).await {
            Ok(response) => response.map(|body| ResponseBody::stream(body.map_err(WebError::from))),
            Err(e) => {
                error!(cause = %e, "static file service failed");
                status_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

fn status_response(status: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(ResponseBody::empty());
    *response.status_mut() = status;
    response
}
