//! Number of exits for subway stops within San Francisco, drawn as points
//! with radius proportional to the square root of the exit count.

use anyhow::Result;
use serde_json::{json, Number, Value};
use tracing::info;

use super::DemoPage;
use crate::config::DemoConfig;
use crate::data_loader::{self, Dataset};
use crate::scene::{Deck, Layer, Tooltip, ViewState};

pub async fn load(config: &DemoConfig) -> Result<DemoPage> {
    let mut stations = data_loader::fetch_json(&config.datasets.bart_stations).await?;
    derive_radius(&mut stations);
    info!("Scatterplot demo loaded: {} stations", stations.len());

    Ok(DemoPage {
        title: "Scatterplot Layer".to_string(),
        deck: build_deck(&stations).map_style(&config.map_style),
        tooltip: tooltip(),
    })
}

pub fn derive_radius(stations: &mut Dataset) {
    stations.derive_column("exits_radius", |record| {
        record
            .get("exits")
            .and_then(Value::as_f64)
            .and_then(|exits| Number::from_f64(exits.sqrt()))
            .map(Value::Number)
            .unwrap_or(Value::Null)
    });
}

pub fn build_deck(stations: &Dataset) -> Deck {
    let layer = Layer::new("ScatterplotLayer")
        .data(stations)
        .property("pickable", true)
        .property("opacity", 0.8)
        .property("stroked", true)
        .property("filled", true)
        .property("radiusScale", 6)
        .property("radiusMinPixels", 1)
        .property("radiusMaxPixels", 100)
        .property("lineWidthMinPixels", 1)
        .accessor("getPosition", "coordinates")
        .accessor("getRadius", "exits_radius")
        .property("getFillColor", json!([255, 140, 0]))
        .property("getLineColor", json!([0, 0, 0]));

    let view = ViewState {
        latitude: 37.7749295,
        longitude: -122.4194155,
        zoom: 10.0,
        bearing: 0.0,
        pitch: 0.0,
    };

    Deck::new(view).layer(layer)
}

pub fn tooltip() -> Tooltip {
    Tooltip::text("{name}\n{address}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stations() -> Dataset {
        Dataset::from_json_str(
            r#"[
                {"name": "Powell St", "address": "899 Market St", "exits": 6400, "coordinates": [-122.4078, 37.7844]},
                {"name": "Civic Center", "address": "1150 Market St", "exits": 2500, "coordinates": [-122.4139, 37.7797]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn radius_is_sqrt_of_exits() {
        let mut stations = sample_stations();
        derive_radius(&mut stations);
        assert_eq!(stations.records()[0]["exits_radius"], json!(80.0));
        assert_eq!(stations.records()[1]["exits_radius"], json!(50.0));
    }

    #[test]
    fn missing_exit_count_yields_null_radius() {
        let mut stations = Dataset::from_json_str(r#"[{"name": "Unknown"}]"#).unwrap();
        derive_radius(&mut stations);
        assert_eq!(stations.records()[0]["exits_radius"], Value::Null);
    }

    #[test]
    fn deck_has_one_scatterplot_layer_with_fixed_fill() {
        let mut stations = sample_stations();
        derive_radius(&mut stations);
        let deck = build_deck(&stations);
        assert_eq!(deck.layers().len(), 1);
        assert_eq!(deck.layers()[0].layer_type_name(), "ScatterplotLayer");

        let doc: Value = serde_json::from_str(&deck.to_json().unwrap()).unwrap();
        let layer = &doc["layers"][0];
        assert_eq!(layer["getFillColor"], json!([255, 140, 0]));
        assert_eq!(layer["getLineColor"], json!([0, 0, 0]));
        assert_eq!(layer["getPosition"], "@@=coordinates");
        assert_eq!(layer["getRadius"], "@@=exits_radius");
        assert_eq!(layer["radiusScale"], 6);
        assert_eq!(layer["radiusMaxPixels"], 100);
        assert_eq!(layer["data"][0]["exits_radius"], json!(80.0));
    }

    #[test]
    fn view_is_flat_over_san_francisco() {
        let deck = build_deck(&sample_stations());
        assert_eq!(deck.view_state().zoom, 10.0);
        assert_eq!(deck.view_state().pitch, 0.0);
    }
}
