//! A tour of the framework: routing, path parameters, multi-method routes,
//! forms, templates and middleware.
//!
//! Run from the workspace root with
//! `cargo run -p coral-web --example getting_started`, then try:
//!
//! ```text
//! curl http://127.0.0.1:8080/home
//! curl http://127.0.0.1:8080/home/coral
//! curl http://127.0.0.1:8080/add/20/22
//! curl -X POST http://127.0.0.1:8080/book
//! curl -d "name=coral&zip=10001" http://127.0.0.1:8080/signup
//! curl http://127.0.0.1:8080/template
//! ```

use coral_web::extract::Form;
use coral_web::middleware::RequestLogger;
use coral_web::router::{Router, any, get, post};
use coral_web::{App, Html, PathParams, Server, TemplateEngine, handler_fn};
use http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;

async fn home() -> &'static str {
    "coral-web: a tiny web framework\r\n"
}

async fn greeting(params: PathParams) -> String {
    format!("Hello, {}\r\n", params.get("name").unwrap_or("stranger"))
}

async fn add(params: PathParams) -> String {
    let val_1: i64 = params.get("val_1").and_then(|v| v.parse().ok()).unwrap_or_default();
    let val_2: i64 = params.get("val_2").and_then(|v| v.parse().ok()).unwrap_or_default();
    format!("{val_1} + {val_2} = {}\r\n", val_1 + val_2)
}

async fn list_books() -> &'static str {
    "endpoint to list books\r\n"
}

async fn create_book() -> (StatusCode, &'static str) {
    (StatusCode::CREATED, "endpoint to create a book\r\n")
}

async fn sample() -> &'static str {
    "answers every method\r\n"
}

#[derive(Deserialize, Debug)]
struct User {
    name: String,
    zip: String,
}

async fn signup(Form(user): Form<User>) -> String {
    format!("registered {} at {}\r\n", user.name, user.zip)
}

#[tokio::main]
async fn main() {
    let engine = Arc::new(TemplateEngine::new("crates/web/examples/templates"));

    let render_engine = Arc::clone(&engine);
    let template_handler = move || {
        let engine = Arc::clone(&render_engine);
        async move {
            engine
                .render("index.html", serde_json::json!({"title": "coral-web", "name": "getting started"}))
                .map(Html)
        }
    };

    let router = Router::builder()
        .route("/home", get(handler_fn(home)))
        .route("/home/{name}", get(handler_fn(greeting)))
        .route("/add/{val_1}/{val_2}", get(handler_fn(add)))
        .route("/book", get(handler_fn(list_books)).post(handler_fn(create_book)))
        .route("/sample", any(handler_fn(sample)))
        .route("/signup", post(handler_fn(signup)))
        .route("/template", get(handler_fn(template_handler)))
        .build();

    let app = App::builder().router(router).template_engine(engine).middleware(RequestLogger).build();

    Server::builder().app(app).address("127.0.0.1:8080").build().unwrap().start().await;
}
