use crate::body::{OptionReqBody, ResponseBody};
use crate::error::BoxError;
use crate::extract::FromRequest;
use crate::fn_trait::FnTrait;
use crate::request::RequestContext;
use crate::responder::Responder;
use async_trait::async_trait;
use http::Response;
use std::marker::PhantomData;

/// A type-erased request handler, the unit the router dispatches to.
///
/// Errors bubble up to the dispatcher, which routes them to the
/// application's exception hook (or a logged 500 when no hook is set).
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &RequestContext<'_>, req_body: OptionReqBody) -> Result<Response<ResponseBody>, BoxError>;
}

/// a `FnTrait` holder which represents any async Fn
pub struct FnHandler<F, Args> {
    f: F,
    _phantom: PhantomData<fn(Args)>,
}

impl<F, Args> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    fn new(f: F) -> Self {
        Self { f, _phantom: PhantomData }
    }
}

/// Adapts a plain async fn into a [`RequestHandler`].
///
/// Every argument is extracted from the request through
/// [`FromRequest`](crate::extract::FromRequest) and the return value is
/// converted into a response through [`Responder`].
pub fn handler_fn<F, Args>(f: F) -> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    FnHandler::new(f)
}

#[async_trait]
impl<F, Args> RequestHandler for FnHandler<F, Args>
where
    F: FnTrait<Args>,
    F::Output: Responder,
    Args: FromRequest + 'static,
{
    async fn invoke(&self, req: &RequestContext<'_>, req_body: OptionReqBody) -> Result<Response<ResponseBody>, BoxError> {
        let args = match Args::from_request(req, req_body).await {
            Ok(args) => args,
            Err(e) => return Err(e.into()),
        };
        let responder = self.f.call(args).await;
        Ok(responder.response_to(req))
    }
}
