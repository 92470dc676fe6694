use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use image::DynamicImage;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{gallery, health, page};
use crate::demos::DemoPage;
use crate::gallery::{encode_data_uri, render_frame};

/// Read-only page state for a demo app, built once at startup.
#[derive(Clone)]
pub struct DemoState {
    pub html: Arc<String>,
    pub scene_json: Arc<String>,
}

/// Read-only frame table for the gallery app, built once at startup.
#[derive(Clone)]
pub struct GalleryState {
    pub frames: Arc<BTreeMap<String, String>>,
    pub empty_frame: Arc<String>,
}

pub fn create_demo_app(
    demo_page: &DemoPage,
    mapbox_key: Option<&str>,
    cors_origin: Option<&str>,
) -> Result<Router> {
    let html = crate::export::to_html::render(demo_page, mapbox_key)
        .map_err(|e| anyhow!("failed to render page: {}", e))?;
    let state = DemoState {
        html: Arc::new(html),
        scene_json: Arc::new(demo_page.deck.to_json()?),
    };

    let app = Router::new()
        .route("/", get(page::index))
        .route("/scene.json", get(page::scene))
        .route("/health", get(health::health_check))
        .layer(ServiceBuilder::new().layer(cors_layer(cors_origin)?))
        .with_state(state);

    Ok(app)
}

pub fn create_gallery_app(
    images: &BTreeMap<String, DynamicImage>,
    cors_origin: Option<&str>,
) -> Result<Router> {
    let mut frames = BTreeMap::new();
    for (name, image) in images {
        let uri = encode_data_uri(image, "png")
            .map_err(|e| anyhow!("failed to encode {}: {}", name, e))?;
        let frame = render_frame(Some(&uri)).map_err(|e| anyhow!("failed to render frame: {}", e))?;
        frames.insert(name.clone(), frame);
    }
    let empty_frame = render_frame(None).map_err(|e| anyhow!("failed to render frame: {}", e))?;

    let state = GalleryState {
        frames: Arc::new(frames),
        empty_frame: Arc::new(empty_frame),
    };

    let app = Router::new()
        .route("/", get(gallery::index))
        .route("/health", get(health::health_check))
        .route("/:name", get(gallery::page))
        .layer(ServiceBuilder::new().layer(cors_layer(cors_origin)?))
        .with_state(state);

    Ok(app)
}

fn cors_layer(cors_origin: Option<&str>) -> Result<CorsLayer> {
    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };
    Ok(cors)
}
