//! Behaviour tests for the full dispatch pipeline, driven through the
//! in-process test client.

use async_trait::async_trait;
use coral_web::extract::{Form, Json, Query};
use coral_web::middleware::Middleware;
use coral_web::router::{any, get, post, Router};
use coral_web::testing::TestClient;
use coral_web::{
    App, BoxError, Html, OptionReqBody, PathParams, RequestContext, RequestHandler, ResponseBody, TemplateEngine,
    handler_fn,
};
use http::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn client_for(router: Router) -> TestClient {
    TestClient::new(App::builder().router(router).build())
}

#[tokio::test]
async fn test_client_can_send_requests() {
    const RESPONSE_TEXT: &str = "THIS IS COOL";

    async fn cool() -> &'static str {
        RESPONSE_TEXT
    }

    let client = client_for(Router::builder().route("/hey", get(handler_fn(cool))).build());

    let response = client.get("/hey").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text(), RESPONSE_TEXT);
}

#[tokio::test]
async fn test_parameterized_route() {
    async fn greet(params: PathParams) -> String {
        format!("hey, {}", params.get("name").unwrap_or_default())
    }

    let client = client_for(Router::builder().route("/{name}", get(handler_fn(greet))).build());

    assert_eq!(client.get("/crab").await.text(), "hey, crab");
    assert_eq!(client.get("/coral").await.text(), "hey, coral");
}

#[tokio::test]
async fn test_default_404_response() {
    let client = client_for(Router::default());

    let response = client.get("/doesnotexist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Not Found!");
}

#[tokio::test]
async fn test_custom_default_handler() {
    async fn nothing_here() -> (StatusCode, &'static str) {
        (StatusCode::NOT_FOUND, "nothing here")
    }

    let app = App::builder().default_handler(handler_fn(nothing_here)).build();
    let client = TestClient::new(app);

    assert_eq!(client.get("/doesnotexist").await.text(), "nothing here");
}

#[tokio::test]
async fn test_multi_method_route() {
    async fn list_books() -> &'static str {
        "this is a get request"
    }

    async fn create_book() -> &'static str {
        "this is a post request"
    }

    let client = client_for(
        Router::builder().route("/book", get(handler_fn(list_books)).post(handler_fn(create_book))).build(),
    );

    assert_eq!(client.get("/book").await.text(), "this is a get request");
    assert_eq!(client.post("/book", ()).await.text(), "this is a post request");
}

#[tokio::test]
async fn test_method_not_allowed() {
    async fn home() -> &'static str {
        "Hello"
    }

    let client = client_for(Router::builder().route("/home", post(handler_fn(home))).build());

    let response = client.get("/home").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    assert_eq!(client.post("/home", ()).await.text(), "Hello");
}

#[tokio::test]
async fn test_any_method_route() {
    async fn sample() -> &'static str {
        "sample route"
    }

    let client = client_for(Router::builder().route("/sample", any(handler_fn(sample))).build());

    assert_eq!(client.get("/sample").await.text(), "sample route");
    assert_eq!(client.post("/sample", ()).await.text(), "sample route");
    assert_eq!(client.request(Method::DELETE, "/sample").send().await.text(), "sample route");
}

#[tokio::test]
async fn test_middleware_methods_are_called() {
    struct Probe {
        request_called: Arc<AtomicBool>,
        response_called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Middleware for Probe {
        async fn on_request(&self, _req: &mut RequestContext<'_>, _body: &mut OptionReqBody) {
            self.request_called.store(true, Ordering::SeqCst);
        }

        async fn on_response(&self, _req: &RequestContext<'_>, _resp: &mut Response<ResponseBody>) {
            self.response_called.store(true, Ordering::SeqCst);
        }
    }

    async fn index() -> &'static str {
        "YOLO"
    }

    let request_called = Arc::new(AtomicBool::new(false));
    let response_called = Arc::new(AtomicBool::new(false));

    let app = App::builder()
        .router(Router::builder().route("/", get(handler_fn(index))).build())
        .middleware(Probe {
            request_called: Arc::clone(&request_called),
            response_called: Arc::clone(&response_called),
        })
        .build();

    TestClient::new(app).get("/").await;

    assert!(request_called.load(Ordering::SeqCst));
    assert!(response_called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_middleware_can_rewrite_response() {
    struct PoweredBy;

    #[async_trait]
    impl Middleware for PoweredBy {
        async fn on_response(&self, _req: &RequestContext<'_>, resp: &mut Response<ResponseBody>) {
            resp.headers_mut().insert("x-powered-by", "coral-web".parse().unwrap());
        }
    }

    async fn index() -> &'static str {
        "ok"
    }

    let app = App::builder()
        .router(Router::builder().route("/", get(handler_fn(index))).build())
        .middleware(PoweredBy)
        .build();

    let response = TestClient::new(app).get("/").await;
    assert_eq!(response.header("x-powered-by"), Some("coral-web"));
}

#[tokio::test]
async fn test_text_response_helper() {
    async fn text_handler() -> String {
        "Simple Plain Text".to_string()
    }

    let client = client_for(Router::builder().route("/text", get(handler_fn(text_handler))).build());

    let response = client.get("/text").await;
    assert!(response.header("content-type").unwrap().contains("text/plain"));
    assert_eq!(response.text(), "Simple Plain Text");
}

#[tokio::test]
async fn test_json_response_helper() {
    #[derive(Serialize)]
    struct Payload {
        name: &'static str,
    }

    async fn json_handler() -> Json<Payload> {
        Json(Payload { name: "Coral" })
    }

    let client = client_for(Router::builder().route("/json", get(handler_fn(json_handler))).build());

    let response = client.get("/json").await;
    assert_eq!(response.header("content-type"), Some(mime::APPLICATION_JSON.as_ref()));

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Coral");
}

#[tokio::test]
async fn test_html_response_helper() {
    async fn html_handler() -> Html {
        Html("<h1>Coral</h1>".to_string())
    }

    let client = client_for(Router::builder().route("/html", get(handler_fn(html_handler))).build());

    let response = client.get("/html").await;
    assert!(response.header("content-type").unwrap().contains("text/html"));
    assert!(response.text().contains("Coral"));
}

#[tokio::test]
async fn test_manually_built_response() {
    async fn body_handler() -> Response<ResponseBody> {
        Response::builder()
            .header("content-type", "text/plain")
            .body(ResponseBody::from("Byte Body"))
            .unwrap()
    }

    let client = client_for(Router::builder().route("/body", get(handler_fn(body_handler))).build());

    let response = client.get("/body").await;
    assert!(response.header("content-type").unwrap().contains("text/plain"));
    assert_eq!(response.text(), "Byte Body");
}

#[tokio::test]
async fn test_template_rendering() {
    #[derive(Serialize)]
    struct Context {
        title: &'static str,
        name: &'static str,
    }

    let engine = Arc::new(TemplateEngine::new("tests/fixtures/templates"));

    let render_engine = Arc::clone(&engine);
    let html_handler = move || {
        let engine = Arc::clone(&render_engine);
        async move { engine.render("index.html", Context { title: "Some Title", name: "Some Name" }).map(Html) }
    };

    let app = App::builder()
        .router(Router::builder().route("/html", get(handler_fn(html_handler))).build())
        .template_engine(engine)
        .build();

    let response = TestClient::new(app).get("/html").await;
    assert!(response.header("content-type").unwrap().contains("text/html"));
    assert!(response.text().contains("Some Title"));
    assert!(response.text().contains("Some Name"));
}

#[tokio::test]
async fn test_assets_are_served() {
    let app = App::builder().static_dir("tests/fixtures/static").build();
    let client = TestClient::new(app);

    let response = client.get("/static/css/main.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text(), "body {background-color: red}\n");
}

#[tokio::test]
async fn test_404_for_nonexistent_static_file() {
    let app = App::builder().static_dir("tests/fixtures/static").build();
    let client = TestClient::new(app);

    let response = client.get("/static/main.css").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

struct FailingHandler;

#[async_trait]
impl RequestHandler for FailingHandler {
    async fn invoke(
        &self,
        _req: &RequestContext<'_>,
        _body: OptionReqBody,
    ) -> Result<Response<ResponseBody>, BoxError> {
        Err("handler exploded".into())
    }
}

#[tokio::test]
async fn test_custom_exception_handler() {
    let app = App::builder()
        .router(Router::builder().route("/", get(FailingHandler)).build())
        .exception_handler(|_req, _err| {
            Response::builder().status(StatusCode::OK).body(ResponseBody::from("ExceptionHandled")).unwrap()
        })
        .build();

    let response = TestClient::new(app).get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text(), "ExceptionHandled");
}

#[tokio::test]
async fn test_unhandled_error_is_a_500() {
    let app = App::builder().router(Router::builder().route("/", get(FailingHandler)).build()).build();

    let response = TestClient::new(app).get("/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_extraction_failure_reaches_exception_handler() {
    async fn needs_json(Json(value): Json<serde_json::Value>) -> String {
        value.to_string()
    }

    let app = App::builder()
        .router(Router::builder().route("/", post(handler_fn(needs_json))).build())
        .exception_handler(|_req, err| {
            Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .body(ResponseBody::from(format!("rejected: {err}")))
                .unwrap()
        })
        .build();

    let response = TestClient::new(app).post("/", "this is not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().starts_with("rejected:"));
}

#[tokio::test]
async fn test_query_extraction() {
    #[derive(Deserialize)]
    struct Params {
        name: String,
    }

    async fn query_handler(Query(params): Query<Params>) -> String {
        format!("hello, {}", params.name)
    }

    let client = client_for(Router::builder().route("/query", get(handler_fn(query_handler))).build());

    assert_eq!(client.get("/query?name=coral").await.text(), "hello, coral");
}

#[tokio::test]
async fn test_form_extraction() {
    #[derive(Deserialize)]
    struct User {
        name: String,
        zip: String,
    }

    async fn form_handler(Form(user): Form<User>) -> String {
        format!("{} lives at {}", user.name, user.zip)
    }

    let client = client_for(Router::builder().route("/form", post(handler_fn(form_handler))).build());

    let response = client
        .request(Method::POST, "/form")
        .content_type(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
        .body("name=coral&zip=10001")
        .send()
        .await;

    assert_eq!(response.text(), "coral lives at 10001");
}

#[tokio::test]
async fn test_json_extraction() {
    #[derive(Deserialize)]
    struct User {
        name: String,
    }

    async fn json_handler(Json(user): Json<User>) -> String {
        format!("hello, {}", user.name)
    }

    let client = client_for(Router::builder().route("/json", post(handler_fn(json_handler))).build());

    let response = client
        .request(Method::POST, "/json")
        .content_type(mime::APPLICATION_JSON.as_ref())
        .body(r#"{"name":"coral"}"#)
        .send()
        .await;

    assert_eq!(response.text(), "hello, coral");
}
