use crate::demos::DemoPage;
use std::error::Error;

/// Render the single-page widget host embedding the scene document, the
/// tooltip template and the map-provider token.
pub fn render(page: &DemoPage, mapbox_key: Option<&str>) -> Result<String, Box<dyn Error>> {
    use serde_json::json;

    let handlebars = crate::common::get_handlebars();

    let res = handlebars.render_template(
        &get_template(),
        &json!({
            "title": page.title,
            "scene": page.deck.to_json()?,
            "tooltip": serde_json::to_string(&page.tooltip)?,
            "mapbox_key": mapbox_key,
        }),
    )?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("to_html.hbs").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::DemoPage;
    use crate::scene::{Deck, Layer, Tooltip, ViewState};

    fn sample_page() -> DemoPage {
        DemoPage {
            title: "Test Page".to_string(),
            deck: Deck::new(ViewState::default()).layer(Layer::new("ScatterplotLayer").id("pts")),
            tooltip: Tooltip::text("{name}"),
        }
    }

    #[test]
    fn page_embeds_scene_and_tooltip() {
        let html = render(&sample_page(), None).unwrap();
        assert!(html.contains("<title>Test Page</title>"));
        assert!(html.contains(r#""@@type":"ScatterplotLayer""#));
        assert!(html.contains(r#"const tooltip = {"text":"{name}"};"#));
        assert!(!html.contains("mapboxApiAccessToken"));
    }

    #[test]
    fn token_is_forwarded_unchanged() {
        let html = render(&sample_page(), Some("pk.test-token")).unwrap();
        assert!(html.contains(r#"mapboxApiAccessToken: "pk.test-token""#));
    }
}
