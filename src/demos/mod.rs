pub mod heatmap;
pub mod s2;
pub mod scatterplot;

use anyhow::Result;
use clap::ValueEnum;

use crate::config::DemoConfig;
use crate::scene::{Deck, Tooltip};

/// A fully assembled demo scene, ready to be embedded in a page.
#[derive(Clone, Debug)]
pub struct DemoPage {
    pub title: String,
    pub deck: Deck,
    pub tooltip: Tooltip,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    /// Livestock heat intensity over New Mexico
    Heatmap,
    /// Extruded S2 cells over San Francisco
    S2,
    /// BART station exits as scaled points
    Scatterplot,
}

impl Demo {
    pub fn name(&self) -> &'static str {
        match self {
            Demo::Heatmap => "heatmap",
            Demo::S2 => "s2",
            Demo::Scatterplot => "scatterplot",
        }
    }

    /// Fetch the demo's fixed datasets and assemble the scene.
    pub async fn load(&self, config: &DemoConfig) -> Result<DemoPage> {
        let page = match self {
            Demo::Heatmap => heatmap::load(config).await?,
            Demo::S2 => s2::load(config).await?,
            Demo::Scatterplot => scatterplot::load(config).await?,
        };
        Ok(page)
    }
}
