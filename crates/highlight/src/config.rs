use crate::error::ConfigError;
use css::set_declaration;
use html::{Document, ElementData, NodeId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Highlighter options. Every field has a default, so a partial TOML table
/// (or an empty one) is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlighterConfig {
    pub color: String,
    pub highlighted_class: String,
    pub context_class: String,
    pub touch_class: String,
    pub disabled: bool,
    pub merge_highlights: bool,
    pub prevent_default: bool,
    pub allow_vertical_scroll: bool,
}

impl Default for HighlighterConfig {
    fn default() -> Self {
        Self {
            color: "#ffff7b".to_string(),
            highlighted_class: "highlighted".to_string(),
            context_class: "highlighter-context".to_string(),
            touch_class: "touch".to_string(),
            disabled: false,
            merge_highlights: true,
            prevent_default: true,
            allow_vertical_scroll: false,
        }
    }
}

impl HighlighterConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// A detached `span` carrying the highlighted class and the configured
    /// background colour, cloned for every new marker.
    pub fn marker_template(&self, doc: &mut Document) -> NodeId {
        let mut data = ElementData::new("span");
        data.add_class(&self.highlighted_class);
        data.set_attribute("style", self.marker_style());
        doc.create_element_with(data)
    }

    /// Inline style declaring the configured background colour.
    pub fn marker_style(&self) -> String {
        set_declaration("", "background-color", &self.color)
    }
}
