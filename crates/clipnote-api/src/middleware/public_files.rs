//! Guard in front of the static file service.
//!
//! While an upload streams, its key exists as an empty reservation next to a
//! hidden `.{key}.part` file. Neither is a published file, so both answer
//! 404 until the upload commits.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use clipnote_core::AppError;
use clipnote_storage::part_file_name;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::HttpAppError;

pub async fn hide_incomplete_uploads(
    State(upload_root): State<Arc<PathBuf>>,
    request: Request,
    next: Next,
) -> Response {
    let relative = request.uri().path().trim_start_matches('/').to_string();
    let file_name = relative.rsplit('/').next().unwrap_or_default();

    if is_hidden(file_name) || is_in_flight(&upload_root, &relative).await {
        tracing::debug!(path = %relative, "Refusing to serve unpublished upload");
        return HttpAppError(AppError::NotFound("File not found".to_string())).into_response();
    }

    next.run(request).await
}

fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.') || file_name.to_ascii_lowercase().starts_with("%2e")
}

/// An upload is in flight while its `.part` sibling exists.
async fn is_in_flight(upload_root: &Path, relative: &str) -> bool {
    if relative.is_empty() || relative.contains("..") {
        return false;
    }
    let path = upload_root.join(relative);
    let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
        return false;
    };
    let part = dir.join(part_file_name(&name.to_string_lossy()));
    tokio::fs::try_exists(part).await.unwrap_or(false)
}
