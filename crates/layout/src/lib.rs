//! Page geometry for highlight hit-testing.

pub mod flow;

pub use flow::{FlowMetrics, layout_text_flow};
pub use hit_test::{HitResult, HitTestIndex};

use core_types::Point;

/// A rectangle in CSS px units (we'll treat everything as px for now).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Euclidean distance from `p` to the nearest edge; 0.0 inside.
    pub fn distance_to(&self, p: Point) -> f32 {
        let dx = (self.x - p.x).max(0.0).max(p.x - (self.x + self.width));
        let dy = (self.y - p.y).max(0.0).max(p.y - (self.y + self.height));
        (dx * dx + dy * dy).sqrt()
    }

    pub fn union(&self, other: Rectangle) -> Rectangle {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rectangle {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}
