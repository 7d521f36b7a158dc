use crate::dom::Document;
use crate::types::NodeId;

/// Depth-first, pre-order walk from `start` up to and including `end`.
///
/// Descent into a node is skipped when `skip_descent` returns true for it; the
/// node itself is still yielded. The walk ends once `end` has been yielded and
/// either has no children or its descent was skipped, or when traversal climbs
/// back to `end` after its children. Climbing past the document root also ends
/// the walk, which bounds ranges whose end precedes their start.
pub struct TreeWalker<'a, F> {
    doc: &'a Document,
    end: NodeId,
    skip_descent: F,
    node: Option<NodeId>,
    entering: bool,
}

impl<'a, F> TreeWalker<'a, F>
where
    F: Fn(&Document, NodeId) -> bool,
{
    pub fn new(doc: &'a Document, start: NodeId, end: NodeId, skip_descent: F) -> Self {
        Self {
            doc,
            end,
            skip_descent,
            node: Some(start),
            entering: true,
        }
    }
}

impl<F> Iterator for TreeWalker<'_, F>
where
    F: Fn(&Document, NodeId) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let node = self.node?;
            let entered = self.entering;
            let descend = entered && !(self.skip_descent)(self.doc, node);

            if node == self.end && (!self.doc.has_children(node) || !descend) {
                self.node = None;
            } else if descend && self.doc.has_children(node) {
                self.node = self.doc.first_child(node);
                self.entering = true;
            } else if let Some(next) = self.doc.next_sibling(node) {
                self.node = Some(next);
                self.entering = true;
            } else {
                self.node = self.doc.parent(node);
                self.entering = false;
            }

            if entered {
                return Some(node);
            }
        }
    }
}

/// Elements whose content is never walked into for highlighting.
pub fn is_ignorable_element(doc: &Document, id: NodeId) -> bool {
    doc.element(id).is_some_and(|el| {
        matches!(
            el.name.to_ascii_lowercase().as_str(),
            "script" | "style" | "select" | "button" | "object" | "applet"
        )
    })
}
