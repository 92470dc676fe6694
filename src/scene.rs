use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::data_loader::Dataset;

/// Camera parameters for the map view.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            latitude: 0.0,
            longitude: 0.0,
            zoom: 1.0,
            bearing: 0.0,
            pitch: 0.0,
        }
    }
}

/// Bounding-box heuristic: center on the bbox midpoint and pick a zoom that
/// fits the larger angular extent. Degenerate inputs fall back to zoom 11.
pub fn compute_view(points: &[(f64, f64)]) -> ViewState {
    if points.is_empty() {
        return ViewState {
            zoom: 11.0,
            ..ViewState::default()
        };
    }

    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    for &(lng, lat) in points {
        min_lng = min_lng.min(lng);
        max_lng = max_lng.max(lng);
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
    }

    let extent = (max_lng - min_lng).max(max_lat - min_lat);
    let zoom = if extent > 0.0 {
        (360.0 / extent).log2().clamp(1.0, 20.0)
    } else {
        11.0
    };

    ViewState {
        latitude: (min_lat + max_lat) / 2.0,
        longitude: (min_lng + max_lng) / 2.0,
        zoom,
        bearing: 0.0,
        pitch: 0.0,
    }
}

/// One visualization layer: a deck.gl layer type plus a property map. Keys
/// are the deck.gl camelCase names; accessor expressions serialize with the
/// `@@=` prefix understood by the JSON converter. Property order is
/// preserved in the serialized document.
#[derive(Serialize, Clone, Debug)]
pub struct Layer {
    #[serde(rename = "@@type")]
    layer_type: String,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(flatten)]
    properties: IndexMap<String, Value>,
}

impl Layer {
    pub fn new(layer_type: &str) -> Self {
        Layer {
            layer_type: layer_type.to_string(),
            id: Uuid::new_v4().to_string(),
            data: None,
            properties: IndexMap::new(),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn data(mut self, dataset: &Dataset) -> Self {
        self.data = Some(dataset.to_value());
        self
    }

    /// A literal property value, carried into the document verbatim.
    pub fn property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// An accessor expression evaluated per record by the widget.
    pub fn accessor(mut self, key: &str, expr: &str) -> Self {
        self.properties
            .insert(key.to_string(), Value::String(format!("@@={}", expr)));
        self
    }

    pub fn layer_type_name(&self) -> &str {
        &self.layer_type
    }
}

/// Tooltip template forwarded to the widget untouched; `{field}` markers are
/// substituted client-side from the picked record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    pub text: String,
}

impl Tooltip {
    pub fn text(text: &str) -> Self {
        Tooltip {
            text: text.to_string(),
        }
    }
}

/// The aggregate scene: layers plus the initial camera, serialized to the
/// JSON document the rendering widget consumes.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    initial_view_state: ViewState,
    layers: Vec<Layer>,
    map_provider: String,
    map_style: String,
    views: Vec<Value>,
}

pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/dark-v10";

impl Deck {
    pub fn new(initial_view_state: ViewState) -> Self {
        Deck {
            initial_view_state,
            layers: Vec::new(),
            map_provider: "mapbox".to_string(),
            map_style: DEFAULT_MAP_STYLE.to_string(),
            views: vec![json!({"@@type": "MapView", "controller": true})],
        }
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn map_style(mut self, style: &str) -> Self {
        self.map_style = style.to_string();
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn view_state(&self) -> &ViewState {
        &self.initial_view_state
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_view_centers_on_bbox_midpoint() {
        let view = compute_view(&[(-106.0, 32.0), (-104.0, 36.0)]);
        assert_eq!(view.longitude, -105.0);
        assert_eq!(view.latitude, 34.0);
        assert_eq!(view.bearing, 0.0);
        assert_eq!(view.pitch, 0.0);
    }

    #[test]
    fn compute_view_zoom_shrinks_with_extent() {
        let tight = compute_view(&[(-122.41, 37.77), (-122.39, 37.79)]);
        let wide = compute_view(&[(-130.0, 30.0), (-100.0, 45.0)]);
        assert!(tight.zoom > wide.zoom);
        assert!(tight.zoom <= 20.0);
        assert!(wide.zoom >= 1.0);
    }

    #[test]
    fn compute_view_single_point_falls_back() {
        let view = compute_view(&[(-122.4, 37.8)]);
        assert_eq!(view.longitude, -122.4);
        assert_eq!(view.latitude, 37.8);
        assert_eq!(view.zoom, 11.0);
    }

    #[test]
    fn compute_view_empty_falls_back_like_a_single_point() {
        let view = compute_view(&[]);
        assert_eq!(view.longitude, 0.0);
        assert_eq!(view.latitude, 0.0);
        assert_eq!(view.zoom, 11.0);
    }

    #[test]
    fn layer_serializes_type_and_accessors() {
        let layer = Layer::new("HeatmapLayer")
            .id("heat")
            .property("opacity", 0.9)
            .accessor("getWeight", "weight");
        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["@@type"], "HeatmapLayer");
        assert_eq!(value["id"], "heat");
        assert_eq!(value["opacity"], 0.9);
        assert_eq!(value["getWeight"], "@@=weight");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn layer_gets_a_generated_id() {
        let a = Layer::new("ScatterplotLayer");
        let b = Layer::new("ScatterplotLayer");
        let a = serde_json::to_value(&a).unwrap();
        let b = serde_json::to_value(&b).unwrap();
        assert_ne!(a["id"], b["id"]);
    }

    #[test]
    fn deck_document_shape() {
        let deck = Deck::new(ViewState {
            latitude: 37.7749295,
            longitude: -122.4194155,
            zoom: 11.0,
            bearing: 0.0,
            pitch: 45.0,
        })
        .layer(Layer::new("S2Layer").id("s2"));

        let value: Value = serde_json::from_str(&deck.to_json().unwrap()).unwrap();
        assert_eq!(value["initialViewState"]["latitude"], 37.7749295);
        assert_eq!(value["initialViewState"]["pitch"], 45.0);
        assert_eq!(value["layers"].as_array().unwrap().len(), 1);
        assert_eq!(value["layers"][0]["@@type"], "S2Layer");
        assert_eq!(value["mapProvider"], "mapbox");
        assert_eq!(value["views"][0]["@@type"], "MapView");
    }
}
