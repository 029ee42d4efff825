//! Attachment HTTP handlers.
//!
//! Endpoints:
//! - POST /attachments      - Multipart upload (`file`, optional `conversation_id`, `message_id`)
//! - GET  /attachments/{id} - Raw bytes with the stored content type

use axum::body::Body;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use chatlog_core::chat::service::AttachmentUpload;
use chatlog_types::attachment::{AttachmentInfo, DEFAULT_CONTENT_TYPE};

use crate::http::error::AppError;
use crate::http::handlers::{begin, elapsed_ms};
use crate::http::response::ApiResponse;
use crate::state::AppState;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

/// Blank form values count as absent.
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// POST /attachments - Store an uploaded file.
pub async fn upload_attachment(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<ApiResponse<AttachmentInfo>, AppError> {
    let (request_id, start) = begin();

    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut conversation_id = None;
    let mut message_id = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((bytes.to_vec(), filename, content_type));
            }
            Some("conversation_id") => {
                conversation_id = non_blank(field.text().await.map_err(multipart_error)?);
            }
            Some("message_id") => {
                message_id = non_blank(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (bytes, filename, content_type) =
        file.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;

    let info = state
        .chat_service
        .upload_attachment(AttachmentUpload {
            bytes,
            filename,
            content_type,
            conversation_id,
            message_id,
        })
        .await?;

    let link = info.url.clone();
    Ok(ApiResponse::success(info, request_id, elapsed_ms(start)).with_link("download", &link))
}

/// `attachment; filename="..."` with quotes and control characters removed
/// and non-ASCII characters replaced by `_`.
fn content_disposition(filename: &str) -> HeaderValue {
    let safe: String = filename
        .chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// GET /attachments/{id} - Download raw bytes.
pub async fn download_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let download = state.chat_service.download_attachment(&id).await?;

    let content_type = HeaderValue::from_str(&download.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&download.filename),
            ),
        ],
        Body::from(download.bytes),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_strips_quotes() {
        let value = content_disposition("my \"notes\".txt");
        assert_eq!(value.to_str().unwrap(), "attachment; filename=\"my notes.txt\"");
    }

    #[test]
    fn test_content_disposition_non_ascii_replaced() {
        let value = content_disposition("résumé.pdf");
        assert_eq!(value.to_str().unwrap(), "attachment; filename=\"r_sum_.pdf\"");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  ".to_string()), None);
        assert_eq!(non_blank("abc".to_string()), Some("abc".to_string()));
    }
}
