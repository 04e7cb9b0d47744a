//! Tuple extraction, the glue that lets handlers take several arguments.
//!
//! Arguments extract left to right; each one receives a clone of the
//! consume-once body handle, so at most one of them may actually read the
//! body. The first failure aborts extraction and carries the error into
//! the dispatcher's error path.

use crate::body::OptionReqBody;
use crate::error::BoxError;
use crate::extract::from_request::FromRequest;
use crate::request::RequestContext;
use async_trait::async_trait;

macro_rules! impl_from_request_for_tuple {
    ($($param:ident)+) => {
        #[async_trait]
        impl<$($param,)+> FromRequest for ($($param,)+)
        where
            $($param: FromRequest + 'static,)+
        {
            type Error = BoxError;

            #[allow(non_snake_case)]
            async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
                Ok(($(
                    match $param::from_request(req, body.clone()).await {
                        Ok($param) => $param,
                        Err(e) => return Err(e.into()),
                    },
                )+))
            }
        }
    }
}

impl_from_request_for_tuple! { A }
impl_from_request_for_tuple! { A B }
impl_from_request_for_tuple! { A B C }
impl_from_request_for_tuple! { A B C D }
impl_from_request_for_tuple! { A B C D E }
impl_from_request_for_tuple! { A B C D E F }
impl_from_request_for_tuple! { A B C D E F G }
impl_from_request_for_tuple! { A B C D E F G H }

#[cfg(test)]
mod tests {
    use crate::body::OptionReqBody;
    use crate::extract::FromRequest;
    use crate::request::{PathParams, RequestContext};
    use http::Method;

    #[tokio::test]
    async fn extracts_left_to_right() {
        let (parts, ()) = http::Request::builder().method(Method::POST).uri("/").body(()).unwrap().into_parts();
        let ctx = RequestContext::new(&parts, PathParams::empty());
        let body = OptionReqBody::from(crate::body::ReqBody::from("hello"));

        let (method, text) = <(Method, String)>::from_request(&ctx, body).await.unwrap();
        assert_eq!(method, Method::POST);
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn second_body_extractor_fails() {
        let (parts, ()) = http::Request::builder().method(Method::POST).uri("/").body(()).unwrap().into_parts();
        let ctx = RequestContext::new(&parts, PathParams::empty());
        let body = OptionReqBody::from(crate::body::ReqBody::from("hello"));

        let result = <(String, String)>::from_request(&ctx, body).await;
        assert!(result.is_err());
    }
}
