mod app;
mod body;
mod error;
mod fn_trait;
mod handler;
mod request;
mod responder;
mod server;
mod static_files;
mod template;

pub mod extract;
pub mod middleware;
pub mod router;
pub mod testing;

pub use app::{App, AppBuilder, ExceptionHandler};
pub use body::OptionReqBody;
pub use body::ReqBody;
pub use body::ResponseBody;
pub use error::{BoxError, WebError};
pub use fn_trait::FnTrait;
pub use handler::FnHandler;
pub use handler::RequestHandler;
pub use handler::handler_fn;
pub use request::PathParams;
pub use request::RequestContext;
pub use responder::{Html, Responder};
pub use router::Router;
pub use server::{Server, ServerBuildError};
pub use template::TemplateEngine;
