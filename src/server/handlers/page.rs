use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};

use crate::server::app::DemoState;

pub async fn index(State(state): State<DemoState>) -> Html<String> {
    Html(state.html.as_ref().clone())
}

pub async fn scene(State(state): State<DemoState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.scene_json.as_ref().clone(),
    )
}
