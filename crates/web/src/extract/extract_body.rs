//! Extractors that consume the request body.
//!
//! The body is a consume-once resource: the first body extractor takes it,
//! any later one fails with [`WebError::BodyConsumed`].

use crate::body::OptionReqBody;
use crate::error::WebError;
use crate::extract::from_request::FromRequest;
use crate::extract::{Form, Json};
use crate::request::RequestContext;
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

#[async_trait]
impl FromRequest for Bytes {
    type Error = WebError;

    async fn from_request(_req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
        body.bytes().await
    }
}

#[async_trait]
impl FromRequest for String {
    type Error = WebError;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
        let bytes = Bytes::from_request(req, body).await?;
        match String::from_utf8(bytes.into()) {
            Ok(s) => Ok(s),
            Err(_) => Err(WebError::invalid_body("request body is not utf8")),
        }
    }
}

/// Deserializes an urlencoded body, `name=coral&zip=10001`.
#[async_trait]
impl<T> FromRequest for Form<T>
where
    T: for<'de> Deserialize<'de> + Send,
{
    type Error = WebError;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
        let bytes = Bytes::from_request(req, body).await?;
        serde_urlencoded::from_bytes::<T>(&bytes).map(Form).map_err(|e| WebError::invalid_body(e.to_string()))
    }
}

/// Deserializes a json body.
#[async_trait]
impl<T> FromRequest for Json<T>
where
    T: for<'de> Deserialize<'de> + Send,
{
    type Error = WebError;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
        let bytes = Bytes::from_request(req, body).await?;
        serde_json::from_slice::<T>(&bytes).map(Json).map_err(|e| WebError::invalid_body(e.to_string()))
    }
}
