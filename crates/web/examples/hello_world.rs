use coral_web::router::{Router, get};
use coral_web::{App, Server, handler_fn};

async fn hello_world() -> &'static str {
    "Hello, World!\r\n"
}

#[tokio::main]
async fn main() {
    let router = Router::builder().route("/", get(handler_fn(hello_world))).build();

    let app = App::builder().router(router).build();

    Server::builder().app(app).address("127.0.0.1:8080").build().unwrap().start().await;
}
