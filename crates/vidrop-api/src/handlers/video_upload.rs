use crate::constants::VIDEO_FIELD;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{field_reader, file_field_info};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use vidrop_core::models::{StoredFile, StoredLocation, UploadResponse};
use vidrop_core::AppError;
use vidrop_storage::VideoUpload;

/// Accept a single video in the `video` multipart field and persist it.
///
/// The file is validated from its declared name and MIME type before any byte
/// of it is read; rejected files never reach storage.
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut multipart = multipart?;
    let mut stored: Option<StoredFile> = None;

    while let Some(field) = multipart.next_field().await? {
        // Plain text fields carry no file and are ignored
        let Some(info) = file_field_info(&field) else {
            continue;
        };

        if info.field_name != VIDEO_FIELD || stored.is_some() {
            return Err(AppError::BadRequest(format!(
                "Unexpected field: {}",
                info.field_name
            ))
            .into());
        }

        state
            .validator
            .validate(&info.file_name, &info.content_type)?;

        let upload = VideoUpload {
            original_name: info.file_name.clone(),
            mime_type: info.content_type.clone(),
            body: field_reader(field, state.config.max_video_size_bytes()),
        };
        let result = state.storage.store(upload).await?;

        stored = Some(StoredFile {
            original_name: info.file_name,
            location: result.location,
            size: result.size_bytes,
            mime_type: info.content_type,
        });
    }

    let file = stored.ok_or(AppError::MissingFile)?;

    match &file.location {
        StoredLocation::Local { stored_name, path } => tracing::info!(
            stored_name = %stored_name,
            path = %path,
            size_bytes = file.size,
            mime_type = %file.mime_type,
            "Uploaded: {}",
            stored_name
        ),
        StoredLocation::Remote { url } => tracing::info!(
            url = %url,
            size_bytes = file.size,
            mime_type = %file.mime_type,
            "Uploaded: {}",
            url
        ),
    }

    Ok(Json(UploadResponse::success(file)))
}
