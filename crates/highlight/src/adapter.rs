//! The boundary between the highlighter and whatever owns the document.
//!
//! A host provides the tree, the user's current selection, and 2D hit
//! testing. [`MemoryHost`] implements all three in memory, with geometry
//! from the fixed-metric flow layout unless an explicit index is installed.

use crate::range::Range;
use core_types::Point;
use html::{Document, NodeId, parse_document};
use layout::{FlowMetrics, HitTestIndex, layout_text_flow};

pub trait DocumentAdapter {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    /// The host's current, possibly collapsed, selection.
    fn active_range(&self) -> Option<Range>;

    fn clear_selection(&mut self);

    /// Nearest element carrying `class` to `point`, in page coordinates.
    fn nearest(&self, point: Point, class: &str) -> Option<NodeId>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    doc: Document,
    selection: Option<Range>,
    hit_index: Option<HitTestIndex>,
    metrics: FlowMetrics,
}

impl MemoryHost {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            ..Self::default()
        }
    }

    pub fn from_markup(markup: &str) -> Self {
        Self::new(parse_document(markup))
    }

    pub fn select(&mut self, range: Range) {
        self.selection = Some(range);
    }

    pub fn selection(&self) -> Option<&Range> {
        self.selection.as_ref()
    }

    /// Use fixed geometry instead of laying out the current tree on demand.
    pub fn set_hit_index(&mut self, index: HitTestIndex) {
        self.hit_index = Some(index);
    }

    pub fn set_metrics(&mut self, metrics: FlowMetrics) {
        self.metrics = metrics;
        self.hit_index = None;
    }

    /// Geometry of the current tree: the installed index, or a fresh flow
    /// layout of the whole document.
    pub fn hit_index(&self) -> HitTestIndex {
        match &self.hit_index {
            Some(index) => index.clone(),
            None => layout_text_flow(&self.doc, self.doc.root(), &self.metrics),
        }
    }

    pub fn into_document(self) -> Document {
        self.doc
    }
}

impl DocumentAdapter for MemoryHost {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    fn active_range(&self) -> Option<Range> {
        self.selection
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn nearest(&self, point: Point, class: &str) -> Option<NodeId> {
        let eligible = |doc: &Document, id: NodeId| doc.has_class(id, class);
        let hit = match &self.hit_index {
            Some(index) => index.nearest(&self.doc, point, eligible),
            None => layout_text_flow(&self.doc, self.doc.root(), &self.metrics)
                .nearest(&self.doc, point, eligible),
        };
        hit.map(|h| h.node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_round_trip() {
        let mut host = MemoryHost::from_markup("<p>hello</p>");
        let range = Range::find_text(host.document(), host.document().root(), "ell").unwrap();
        host.select(range);
        assert_eq!(host.active_range(), Some(range));
        host.clear_selection();
        assert_eq!(host.active_range(), None);
    }

    #[test]
    fn nearest_uses_flow_layout_of_the_current_tree() {
        let mut host = MemoryHost::from_markup(
            r#"<p><span class="w">one</span> <span class="w">two</span></p>"#,
        );
        let p = host.document().first_child(host.document().root()).unwrap();
        let two = host.document().children(p)[2];

        // "one " spans x 0..32 at 8px per character.
        assert_eq!(host.nearest(Point::new(40.0, 5.0), "w"), Some(two));
        assert_eq!(host.nearest(Point::new(40.0, 5.0), "missing"), None);

        let mut index = HitTestIndex::new();
        index.insert(
            p,
            layout::Rectangle {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            },
        );
        host.set_hit_index(index);
        assert_eq!(host.nearest(Point::new(40.0, 5.0), "w"), None);
    }

    #[test]
    fn new_metrics_drop_the_fixed_index() {
        let mut host = MemoryHost::from_markup(
            r#"<p><span class="w">one</span> <span class="w">two</span></p>"#,
        );
        let p = host.document().first_child(host.document().root()).unwrap();
        let one = host.document().children(p)[0];
        host.set_hit_index(HitTestIndex::new());
        assert_eq!(host.nearest(Point::new(40.0, 5.0), "w"), None);

        // At 20px per character "one" covers x 0..60.
        host.set_metrics(FlowMetrics {
            char_width: 20.0,
            ..FlowMetrics::default()
        });
        assert_eq!(host.nearest(Point::new(40.0, 5.0), "w"), Some(one));

        let doc = host.into_document();
        assert_eq!(doc.text_content(doc.root()), "one two");
    }
}
