//! Rendered marker style and its equality.
//!
//! Two markers are "the same highlight" when their inline `background-color`
//! resolves to the same colour, regardless of how it was spelled.

use css::{declared_value, parse_color};
use html::{Document, NodeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Rgba(u8, u8, u8, u8),
    /// A value `parse_color` does not understand, kept lowercase for comparison.
    Keyword(String),
}

impl Color {
    pub fn parse(value: &str) -> Color {
        match parse_color(value) {
            Some((r, g, b, a)) => Color::Rgba(r, g, b, a),
            None => {
                log::warn!(target: "highlight.controller", "unrecognized colour {value:?}");
                Color::Keyword(value.trim().to_ascii_lowercase())
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub background: Option<Color>,
}

impl Style {
    pub fn with_background(value: &str) -> Style {
        Style {
            background: Some(Color::parse(value)),
        }
    }

    /// Style declared inline on `node`; non-elements have the default style.
    pub fn of(doc: &Document, node: NodeId) -> Style {
        let background = doc
            .element(node)
            .and_then(|el| el.attribute("style"))
            .and_then(|style| declared_value(style, "background-color"))
            .map(|value| Color::parse(&value));
        Style { background }
    }
}
