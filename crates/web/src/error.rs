use std::io;
use thiserror::Error;

/// Boxed error type produced by request handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("template error: {source}")]
    Template {
        #[from]
        source: minijinja::Error,
    },

    #[error("no template engine configured")]
    NoTemplateEngine,

    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("invalid query string: {reason}")]
    InvalidQuery { reason: String },

    #[error("request body already consumed")]
    BodyConsumed,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("connection error: {source}")]
    Connection {
        #[from]
        source: hyper::Error,
    },
}

impl WebError {
    pub fn invalid_body<S: ToString>(reason: S) -> Self {
        Self::InvalidBody { reason: reason.to_string() }
    }

    pub fn invalid_query<S: ToString>(reason: S) -> Self {
        Self::InvalidQuery { reason: reason.to_string() }
    }
}
