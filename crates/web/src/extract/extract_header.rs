//! Extractors for data carried in the request head.

use crate::body::OptionReqBody;
use crate::extract::from_request::FromRequest;
use crate::request::RequestContext;
use async_trait::async_trait;
use http::{HeaderMap, Method, Uri, Version};
use std::convert::Infallible;

#[async_trait]
impl FromRequest for Method {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(req.method().clone())
    }
}

#[async_trait]
impl FromRequest for Uri {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(req.uri().clone())
    }
}

#[async_trait]
impl FromRequest for Version {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(req.version())
    }
}

#[async_trait]
impl FromRequest for HeaderMap {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(req.headers().clone())
    }
}
