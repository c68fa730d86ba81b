//! Axum route handler for resume uploads.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::extractor::{extract_text_from_file, ExtractionError};
use crate::state::AppState;

/// Largest accepted resume file.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Request body limit for the upload route: the file plus multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

const RESUME_FIELD: &str = "resume";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub resume_content: String,
    pub filename: String,
}

/// POST /upload-resume
///
/// Accepts a single PDF in the `resume` multipart field and returns its text.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        if field.content_type() != Some(PDF_CONTENT_TYPE) {
            return Err(AppError::Upload("Only PDF files are allowed!".to_string()));
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(too_large());
        }
        upload = Some(data);
        break;
    }

    let data = upload.ok_or_else(|| AppError::Upload("No file uploaded".to_string()))?;
    let upload_dir = state.config.upload_dir.clone();
    let size = data.len();

    // PDF parsing is CPU-bound; keep it off the async workers.
    let (filename, resume_content) =
        tokio::task::spawn_blocking(move || extract_from_scratch(&upload_dir, &data))
            .await
            .context("resume extraction task failed")??;

    info!("Parsed resume {filename} ({size} bytes)");

    Ok(Json(UploadResponse {
        success: true,
        message: "Resume uploaded and parsed successfully".to_string(),
        resume_content,
        filename,
    }))
}

/// Writes the upload to a scratch file, extracts it, and removes the file.
/// Returns the scratch file name alongside the text.
fn extract_from_scratch(upload_dir: &Path, data: &[u8]) -> Result<(String, String), AppError> {
    let prefix = format!("resume-{}-", chrono::Utc::now().timestamp_millis());
    let mut scratch = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".pdf")
        .tempfile_in(upload_dir)
        .context("failed to create scratch file for upload")?;

    scratch
        .write_all(data)
        .and_then(|_| scratch.flush())
        .context("failed to write uploaded resume")?;

    let filename = scratch
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let text = extract_text_from_file(scratch.path()).map_err(extraction_error)?;
    Ok((filename, text))
}

fn extraction_error(e: ExtractionError) -> AppError {
    AppError::Extraction(e.to_string())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        AppError::Upload(e.body_text())
    }
}

fn too_large() -> AppError {
    AppError::PayloadTooLarge(format!(
        "Resume must be at most {} MB",
        MAX_UPLOAD_BYTES / (1024 * 1024)
    ))
}
