use thiserror::Error;

/// Readable failures raised by the outbound clients. Callers only ever see them
/// wrapped in `anyhow::Error`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("{0} returned no usable content")]
    EmptyResponse(&'static str),
}

/// Turn a non-success response into `ServiceError::Status`, keeping the body for the message.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        service,
        status,
        body,
    })
}
