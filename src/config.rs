use serde::{Deserialize, Serialize};

use crate::scene::DEFAULT_MAP_STYLE;

pub const CATTLE_DATA: &str =
    "https://raw.githubusercontent.com/ajduberstein/geo_datasets/master/nm_cattle.csv";
pub const POULTRY_DATA: &str =
    "https://raw.githubusercontent.com/ajduberstein/geo_datasets/master/nm_chickens.csv";
pub const S2_LAYER_DATA: &str =
    "https://raw.githubusercontent.com/visgl/deck.gl-data/master/website/sf.s2cells.json";
pub const SCATTERPLOT_LAYER_DATA: &str =
    "https://raw.githubusercontent.com/visgl/deck.gl-data/master/website/bart-stations.json";

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DatasetUrls {
    pub cattle: String,
    pub poultry: String,
    pub s2_cells: String,
    pub bart_stations: String,
}

impl Default for DatasetUrls {
    fn default() -> Self {
        DatasetUrls {
            cattle: CATTLE_DATA.to_string(),
            poultry: POULTRY_DATA.to_string(),
            s2_cells: S2_LAYER_DATA.to_string(),
            bart_stations: SCATTERPLOT_LAYER_DATA.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DemoConfig {
    pub port: u16,
    pub map_style: String,
    pub cors_origin: Option<String>,
    pub datasets: DatasetUrls,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            port: 8050,
            map_style: DEFAULT_MAP_STYLE.to_string(),
            cors_origin: None,
            datasets: DatasetUrls::default(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_yaml::from_str(&content)?)
            }
            None => Ok(DemoConfig::default()),
        }
    }
}

/// The map-provider token is forwarded unchanged into the rendered page; an
/// absent token leaves the widget without a base map rather than failing.
pub fn mapbox_api_token() -> Option<String> {
    std::env::var("MAPBOX_ACCESS_TOKEN").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dataset_urls() {
        let config = DemoConfig::default();
        assert_eq!(config.port, 8050);
        assert_eq!(config.datasets.cattle, CATTLE_DATA);
        assert_eq!(config.datasets.bart_stations, SCATTERPLOT_LAYER_DATA);
    }

    #[test]
    fn partial_yaml_overrides_defaults() {
        let config: DemoConfig = serde_yaml::from_str("port: 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.map_style, DEFAULT_MAP_STYLE);
        assert_eq!(config.datasets.s2_cells, S2_LAYER_DATA);
    }

    #[test]
    fn dataset_urls_can_be_overridden() {
        let yaml = "datasets:\n  cattle: \"http://localhost/cattle.csv\"\n";
        let config: DemoConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.datasets.cattle, "http://localhost/cattle.csv");
        assert_eq!(config.datasets.poultry, POULTRY_DATA);
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = DemoConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: DemoConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.port, config.port);
        assert_eq!(back.map_style, config.map_style);
    }
}
