use axum::extract::{Path, State};
use axum::response::Html;

use crate::server::app::GalleryState;

pub async fn index(State(state): State<GalleryState>) -> Html<String> {
    Html(state.empty_frame.as_ref().clone())
}

/// Unmapped names behave like the root path: the displayed image does not
/// change.
pub async fn page(State(state): State<GalleryState>, Path(name): Path<String>) -> Html<String> {
    match state.frames.get(&name) {
        Some(frame) => Html(frame.clone()),
        None => Html(state.empty_frame.as_ref().clone()),
    }
}
