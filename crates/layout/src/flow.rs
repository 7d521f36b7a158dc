//! Fixed-metric inline flow used to give nodes page coordinates without a
//! rendering engine.
//!
//! Every character advances by `char_width`; text runs move to a new line when
//! they would overflow `max_width`. Block-level elements start on a new line.
//! Element boxes are the union of their descendant text boxes.

use crate::{HitTestIndex, Rectangle};
use html::{Document, NodeId, NodeKind, is_ignorable_element};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowMetrics {
    pub char_width: f32,
    pub line_height: f32,
    pub max_width: f32,
}

impl Default for FlowMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            max_width: 640.0,
        }
    }
}

fn is_block(doc: &Document, id: NodeId) -> bool {
    doc.element(id).is_some_and(|el| {
        matches!(
            el.name.as_str(),
            "p" | "div"
                | "section"
                | "article"
                | "header"
                | "footer"
                | "li"
                | "ul"
                | "ol"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "blockquote"
        )
    })
}

struct Cursor {
    x: f32,
    y: f32,
}

impl Cursor {
    fn new_line(&mut self, metrics: &FlowMetrics) {
        if self.x > 0.0 {
            self.x = 0.0;
            self.y += metrics.line_height;
        }
    }
}

/// Lay out the subtree under `root` and index every node that received a box.
pub fn layout_text_flow(doc: &Document, root: NodeId, metrics: &FlowMetrics) -> HitTestIndex {
    let mut boxes: HashMap<NodeId, Rectangle> = HashMap::new();
    let mut cursor = Cursor { x: 0.0, y: 0.0 };
    place(doc, root, metrics, &mut cursor, &mut boxes);

    let mut index = HitTestIndex::new();
    for id in std::iter::once(root).chain(doc.descendants(root)) {
        if let Some(rect) = boxes.get(&id) {
            index.insert(id, *rect);
        }
    }
    index
}

fn place(
    doc: &Document,
    id: NodeId,
    metrics: &FlowMetrics,
    cursor: &mut Cursor,
    boxes: &mut HashMap<NodeId, Rectangle>,
) -> Option<Rectangle> {
    match doc.kind(id)? {
        NodeKind::Text(text) => {
            let width = text.chars().count() as f32 * metrics.char_width;
            if width == 0.0 {
                return None;
            }
            if cursor.x > 0.0 && cursor.x + width > metrics.max_width {
                cursor.new_line(metrics);
            }
            let rect = Rectangle {
                x: cursor.x,
                y: cursor.y,
                width,
                height: metrics.line_height,
            };
            cursor.x += width;
            boxes.insert(id, rect);
            Some(rect)
        }
        NodeKind::Element(_) | NodeKind::Document { .. } => {
            let block = is_block(doc, id);
            if block {
                cursor.new_line(metrics);
            }
            let mut union: Option<Rectangle> = None;
            if !is_ignorable_element(doc, id) {
                for child in doc.children(id) {
                    if let Some(rect) = place(doc, *child, metrics, cursor, boxes) {
                        union = Some(union.map_or(rect, |u| u.union(rect)));
                    }
                }
            }
            if block {
                cursor.new_line(metrics);
            }
            if let Some(rect) = union {
                boxes.insert(id, rect);
            }
            union
        }
        NodeKind::Comment(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Point;
    use html::parse_document;

    #[test]
    fn words_get_consecutive_boxes() {
        let doc = parse_document("<p><span>hello</span> <span>world</span></p>");
        let p = doc.first_child(doc.root()).unwrap();
        let [hello, world] = [0, 2].map(|i| doc.children(p)[i]);
        let index = layout_text_flow(&doc, doc.root(), &FlowMetrics::default());

        assert_eq!(
            index.rect_of(hello),
            Some(Rectangle {
                x: 0.0,
                y: 0.0,
                width: 40.0,
                height: 20.0
            })
        );
        assert_eq!(index.rect_of(world).map(|r| r.x), Some(48.0));
        assert_eq!(index.rect_of(p).map(|r| r.width), Some(88.0));

        let hit = index
            .nearest(&doc, Point::new(60.0, 10.0), |doc, id| {
                doc.is_element_named(id, "span")
            })
            .unwrap();
        assert_eq!(hit.node_id, world);
    }

    #[test]
    fn blocks_and_overflow_start_new_lines() {
        let doc = parse_document("<p>aaaa</p><p>bbbb cccc</p>");
        let metrics = FlowMetrics {
            char_width: 10.0,
            line_height: 10.0,
            max_width: 60.0,
        };
        let index = layout_text_flow(&doc, doc.root(), &metrics);
        let second = doc.children(doc.root())[1];
        let text = doc.first_child(second).unwrap();

        // "bbbb cccc" is 90px wide: it starts a fresh line and overflows alone.
        assert_eq!(index.rect_of(text).map(|r| (r.x, r.y)), Some((0.0, 10.0)));
    }
}
