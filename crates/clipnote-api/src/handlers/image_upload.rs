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

/// `POST /api/v0/uploads/images`
#[tracing::instrument(skip_all, fields(channel = "image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart?;
    let cancel = state.shutdown.child_token();
    let result = store_multipart_file(&state.gate, Channel::Image, multipart, &cancel).await?;

    Ok(Json(UploadResponse::from_result(&state, result)))
}
