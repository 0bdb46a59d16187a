use crate::page;
use anyhow::Context;
use application::rag_service::RagService;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use shared::types::Result;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Handles shared by every request. Built once, never mutated.
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
}

impl AppState {
    pub fn new(rag: Arc<RagService>) -> Self {
        Self { rag }
    }
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub query: String,
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            WebError::Internal(err) => {
                error!(error = %format!("{err:#}"), "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The server encountered an internal error and was unable to complete your request.".to_string(),
                )
            }
        };
        (status, Html(page::render_error(status, &message))).into_response()
    }
}

/// `/` serves the empty form on GET and answers the submitted question on POST.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home).post(ask))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Html<String> {
    Html(page::render(None))
}

async fn ask(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> std::result::Result<Html<String>, WebError> {
    if form.query.is_empty() {
        return Err(WebError::BadRequest("Please enter a question.".to_string()));
    }
    let exchange = state.rag.answer(&form.query).await?;
    Ok(Html(page::render(Some(&exchange))))
}

pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let bind_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}
