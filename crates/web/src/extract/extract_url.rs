//! URL extraction functionality: query strings and path parameters.
//!
//! # Example
//! ```no_run
//! # use serde::Deserialize;
//! # use coral_web::extract::Query;
//!
//! #[derive(Deserialize)]
//! struct Params {
//!     name: String,
//!     age: u32,
//! }
//!
//! async fn handler(Query(params): Query<Params>) -> String {
//!     format!("Name: {}, Age: {}", params.name, params.age)
//! }
//! ```

use crate::body::OptionReqBody;
use crate::error::WebError;
use crate::extract::from_request::FromRequest;
use crate::extract::Query;
use crate::request::{PathParams, RequestContext};
use async_trait::async_trait;
use serde::Deserialize;
use std::convert::Infallible;

/// Implements query string extraction for any type that implements
/// Deserialize, using serde_qs. An absent query string deserializes as
/// empty input.
#[async_trait]
impl<T> FromRequest for Query<T>
where
    T: for<'de> Deserialize<'de> + Send,
{
    type Error = WebError;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        let query = req.query().unwrap_or("");
        serde_qs::from_str::<T>(query).map(Query).map_err(|e| WebError::invalid_query(e.to_string()))
    }
}

/// The captured path parameters of the matched route.
#[async_trait]
impl FromRequest for PathParams {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(req.path_params().clone())
    }
}
