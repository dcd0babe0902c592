use crate::error::HttpAppError;
use crate::handlers::UploadResponse;
use crate::state::AppState;
use crate::utils::upload::store_multipart_file;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use clipnote_core::Channel;
use std::sync::Arc;

/// `POST /api/v0/uploads/videos`
///
/// The returned key and url are what a caller stores in its `VideoRecord`.
#[tracing::instrument(skip_all, fields(channel = "video"))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart?;
    let cancel = state.shutdown.child_token();
    let result = store_multipart_file(&state.gate, Channel::Video, multipart, &cancel).await?;

    Ok(Json(UploadResponse::from_result(&state, result)))
}
