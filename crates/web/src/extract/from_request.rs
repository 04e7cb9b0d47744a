use crate::body::OptionReqBody;
use crate::error::BoxError;
use crate::request::RequestContext;
use async_trait::async_trait;
use std::convert::Infallible;

/// Extracts a typed, owned value out of the request.
///
/// Handler arguments implement this trait; extraction failures flow into
/// the dispatcher's error path (the exception hook, or a logged 500) the
/// same way handler failures do.
#[async_trait]
pub trait FromRequest: Sized + Send {
    type Error: Into<BoxError> + Send;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error>;
}

/// An `Option` extractor swallows the inner extractor's failure.
#[async_trait]
impl<T> FromRequest for Option<T>
where
    T: FromRequest + 'static,
{
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(T::from_request(req, body).await.ok())
    }
}

/// A `Result` extractor hands the inner extractor's outcome to the handler
/// to inspect.
#[async_trait]
impl<T> FromRequest for Result<T, T::Error>
where
    T: FromRequest + 'static,
{
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(T::from_request(req, body).await)
    }
}

#[async_trait]
impl FromRequest for () {
    type Error = Infallible;

    async fn from_request(_req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(())
    }
}
