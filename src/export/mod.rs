pub mod to_html;
pub mod to_json;
