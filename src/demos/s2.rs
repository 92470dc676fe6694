//! Values plotted per S2 cell over San Francisco, extruded by value.

use anyhow::Result;
use tracing::info;

use super::DemoPage;
use crate::config::DemoConfig;
use crate::data_loader::{self, Dataset};
use crate::scene::{Deck, Layer, Tooltip, ViewState};

pub async fn load(config: &DemoConfig) -> Result<DemoPage> {
    let cells = data_loader::fetch_json(&config.datasets.s2_cells).await?;
    info!("S2 demo loaded: {} cells", cells.len());

    Ok(DemoPage {
        title: "S2 Layer".to_string(),
        deck: build_deck(&cells).map_style(&config.map_style),
        tooltip: tooltip(),
    })
}

pub fn build_deck(cells: &Dataset) -> Deck {
    let layer = Layer::new("S2Layer")
        .data(cells)
        .property("pickable", true)
        .property("wireframe", false)
        .property("filled", true)
        .property("extruded", true)
        .property("elevationScale", 1000)
        .accessor("getS2Token", "token")
        .accessor(
            "getFillColor",
            "[value * 255, (1 - value) * 255, (1 - value) * 128]",
        )
        .accessor("getElevation", "value");

    let view = ViewState {
        latitude: 37.7749295,
        longitude: -122.4194155,
        zoom: 11.0,
        bearing: 0.0,
        pitch: 45.0,
    };

    Deck::new(view).layer(layer)
}

pub fn tooltip() -> Tooltip {
    Tooltip::text("{token} value: {value}")
}
