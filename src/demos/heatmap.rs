//! Location of livestock raised in New Mexico in 2006, via the United
//! Nations and FAOSTAT. Poultry concentration renders in blue, cattle in
//! orange.

use anyhow::Result;
use serde_json::json;
use tracing::info;

use super::DemoPage;
use crate::config::DemoConfig;
use crate::data_loader::{self, Dataset};
use crate::scene::{compute_view, Deck, Layer, Tooltip};

const HEADER: [&str; 3] = ["lng", "lat", "weight"];

const COLOR_BREWER_BLUE_SCALE: [[u8; 3]; 6] = [
    [240, 249, 232],
    [204, 235, 197],
    [168, 221, 181],
    [123, 204, 196],
    [67, 162, 202],
    [8, 104, 172],
];

pub async fn load(config: &DemoConfig) -> Result<DemoPage> {
    let mut cattle = data_loader::fetch_csv(&config.datasets.cattle, Some(&HEADER)).await?;
    let mut poultry = data_loader::fetch_csv(&config.datasets.poultry, Some(&HEADER)).await?;
    cattle.sample_half();
    poultry.sample_half();
    info!(
        "Heatmap demo loaded: {} cattle records, {} poultry records",
        cattle.len(),
        poultry.len()
    );

    Ok(DemoPage {
        title: "Heatmap Layer".to_string(),
        deck: build_deck(&cattle, &poultry).map_style(&config.map_style),
        tooltip: tooltip(),
    })
}

pub fn build_deck(cattle: &Dataset, poultry: &Dataset) -> Deck {
    let mut view = compute_view(&cattle.lng_lat("lng", "lat"));
    view.zoom = 6.0;

    let cattle_layer = Layer::new("HeatmapLayer")
        .data(cattle)
        .property("opacity", 0.9)
        .accessor("getPosition", "[lng, lat]")
        .property("aggregation", "MEAN")
        .property("colorRange", json!(COLOR_BREWER_BLUE_SCALE))
        .property("threshold", 1.0)
        .accessor("getWeight", "weight")
        .property("pickable", true);

    let poultry_layer = Layer::new("HeatmapLayer")
        .data(poultry)
        .property("opacity", 0.9)
        .accessor("getPosition", "[lng, lat]")
        .property("threshold", 0.75)
        .property("aggregation", "MEAN")
        .accessor("getWeight", "weight")
        .property("pickable", true);

    Deck::new(view).layer(cattle_layer).layer(poultry_layer)
}

pub fn tooltip() -> Tooltip {
    Tooltip::text("Concentration of cattle in blue, concentration of poultry in orange")
}
