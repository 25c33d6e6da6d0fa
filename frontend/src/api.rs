//! HTTP client for the classification service and the record store.
//!
//! Both endpoints are external collaborators; this module only speaks
//! their request/response contract and maps every failure into a typed
//! error for the caller to surface.

use gloo_net::http::{Request, Response};
use shared::{ClassificationRecord, Prediction};
use thiserror::Error;
use web_sys::{Blob, FormData};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to build request: {0}")]
    Request(String),
}

/// Fetch the full classification history.
pub async fn fetch_records() -> Result<Vec<ClassificationRecord>, ApiError> {
    let response = Request::get("/api/records")
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response
        .json::<Vec<ClassificationRecord>>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Submit one image payload as a single-file multipart body. Used by both
/// capture paths; `filename` labels the part for the service's records.
pub async fn classify_image(blob: &Blob, filename: &str) -> Result<Prediction, ApiError> {
    let form_data = FormData::new().map_err(|err| ApiError::Request(format!("{err:?}")))?;
    form_data
        .append_with_blob_and_filename("file", blob, filename)
        .map_err(|err| ApiError::Request(format!("{err:?}")))?;

    let response = Request::post("/api/classify")
        .body(form_data)
        .map_err(|err| ApiError::Request(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response
        .json::<Prediction>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::Status { status, body }
}
