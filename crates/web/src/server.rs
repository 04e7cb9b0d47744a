use crate::app::App;
use crate::body::ReqBody;
use http::Request;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

pub struct ServerBuilder {
    app: Option<App>,
    address: Option<Vec<SocketAddr>>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { app: None, address: None }
    }

    pub fn app(mut self, app: App) -> Self {
        self.app = Some(app);
        self
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().unwrap().collect::<Vec<_>>());
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let app = self.app.ok_or(ServerBuildError::MissingApp)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        Ok(Server { app: Arc::new(app), address })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("app must be set")]
    MissingApp,
    #[error("address must be set")]
    MissingAddress,
}

/// Serves an [`App`] over HTTP/1.1; the protocol is hyper's business, one
/// task is spawned per accepted connection.
pub struct Server {
    app: Arc<App>,
    address: Vec<SocketAddr>,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub async fn start(self) {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
        tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

        info!("start listening at {:?}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return;
            }
        };

        loop {
            let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let app = Arc::clone(&self.app);

            tokio::spawn(async move {
                let io = TokioIo::new(tcp_stream);
                let service = service_fn(move |req: Request<Incoming>| {
                    let app = Arc::clone(&app);
                    async move { Ok::<_, Infallible>(app.handle(req.map(ReqBody::from)).await) }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    error!(cause = %e, "connection error, connection shutdown");
                }
            });
        }
    }
}
