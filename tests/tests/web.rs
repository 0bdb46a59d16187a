use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use presentation::page::escape;
use presentation::web::{router, AppState};
use std::sync::Arc;
use tests::{FakeEmbedder, FakeGenerator, FakeIndex, Harness};
use tower::util::ServiceExt;

fn app(harness: &Harness) -> Router {
    router(AppState::new(Arc::new(harness.service())))
}

fn flu_harness() -> Harness {
    Harness::new(
        FakeEmbedder::returning(vec![0.1, 0.2]),
        FakeIndex::with_texts(&["Flu causes fever.", "Flu causes fatigue."]),
        FakeGenerator::replying("  Take rest and fluids.  \n"),
    )
}

fn form_post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_get_renders_empty_form() {
    let harness = flu_harness();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app(&harness).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("name=\"query\""));
    assert!(!html.contains("class=\"answer\""));
    assert!(harness.embedder.texts().is_empty());
    assert!(harness.generator.prompts().is_empty());
}

#[tokio::test]
async fn test_post_renders_query_and_trimmed_answer() {
    let harness = flu_harness();

    let response = app(&harness)
        .oneshot(form_post("query=What+are+symptoms+of+flu%3F"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&escape("What are symptoms of flu?")));
    assert!(html.contains(&format!(
        "<div class=\"answer\">{}</div>",
        escape("Take rest and fluids.")
    )));
    assert_eq!(
        harness.embedder.texts(),
        vec!["What are symptoms of flu?".to_string()]
    );
    assert_eq!(harness.generator.prompts().len(), 1);
}

#[tokio::test]
async fn test_post_escapes_markup_in_query() {
    let harness = flu_harness();

    let response = app(&harness)
        .oneshot(form_post("query=%3Cb%3Eflu%3C%2Fb%3E"))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(!html.contains("<b>flu</b>"));
    assert!(html.contains("&lt;b&gt;flu"));
}

#[tokio::test]
async fn test_index_failure_returns_error_page_without_generation() {
    let harness = Harness::new(
        FakeEmbedder::returning(vec![0.1]),
        FakeIndex::failing(),
        FakeGenerator::replying("unused"),
    );

    let response = app(&harness)
        .oneshot(form_post("query=flu"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("Internal Server Error"));
    assert!(!html.contains("401"));
    assert!(harness.generator.prompts().is_empty());
}

#[tokio::test]
async fn test_empty_query_is_bad_request() {
    let harness = flu_harness();

    let response = app(&harness)
        .oneshot(form_post("query="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(harness.embedder.texts().is_empty());
}

#[tokio::test]
async fn test_missing_query_field_is_rejected() {
    let harness = flu_harness();

    let response = app(&harness)
        .oneshot(form_post("question=flu"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(harness.embedder.texts().is_empty());
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let harness = flu_harness();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app(&harness).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_whitespace_query_is_answered_as_typed() {
    let harness = flu_harness();

    let response = app(&harness)
        .oneshot(form_post("query=+flu+"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(harness.embedder.texts(), vec![" flu ".to_string()]);
}
