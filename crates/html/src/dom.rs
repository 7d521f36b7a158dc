//! Arena-backed mutable document tree.
//!
//! Invariants:
//! - Slot 0 is the document root; it never has a parent.
//! - A node has at most one parent, and appears exactly once in that parent's
//!   child list.
//! - Operations never create cycles.
//! - Slots are never reused; a detached node keeps its handle and subtree.

use crate::types::{ElementData, NodeId, NodeKind};
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomError {
    UnknownNode(NodeId),
    InvalidParent(NodeId),
    NotAChild { parent: NodeId, child: NodeId },
    CycleDetected { parent: NodeId, child: NodeId },
    Detached(NodeId),
    RootNotMovable,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownNode(id) => write!(f, "unknown node {}", id.0),
            DomError::InvalidParent(id) => write!(f, "node {} cannot have children", id.0),
            DomError::NotAChild { parent, child } => {
                write!(f, "node {} is not a child of node {}", child.0, parent.0)
            }
            DomError::CycleDetected { parent, child } => write!(
                f,
                "inserting node {} under node {} would create a cycle",
                child.0, parent.0
            ),
            DomError::Detached(id) => write!(f, "node {} has no parent", id.0),
            DomError::RootNotMovable => f.write_str("the document root cannot be moved"),
        }
    }
}

impl std::error::Error for DomError {}

#[derive(Clone, Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![NodeRecord {
                kind: NodeKind::Document { doctype: None },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Number of allocated slots, attached or not.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    fn record(&self, id: NodeId) -> Result<&NodeRecord, DomError> {
        self.nodes.get(id.index()).ok_or(DomError::UnknownNode(id))
    }

    fn record_mut(&mut self, id: NodeId) -> Result<&mut NodeRecord, DomError> {
        self.nodes.get_mut(id.index()).ok_or(DomError::UnknownNode(id))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn set_doctype(&mut self, doctype: impl Into<String>) {
        if let NodeKind::Document { doctype: slot } = &mut self.nodes[0].kind {
            *slot = Some(doctype.into());
        }
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData::new(name.to_ascii_lowercase())))
    }

    pub fn create_element_with(&mut self, data: ElementData) -> NodeId {
        self.push(NodeKind::Element(data))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    // ---------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.index()).map(|r| &r.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id.index())?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Text(existing) => {
                *existing = text.into();
                Ok(())
            }
            _ => Err(DomError::InvalidParent(id)),
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.text(id).is_some()
    }

    pub fn is_element_named(&self, id: NodeId, name: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.name.eq_ignore_ascii_case(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|r| r.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|r| r.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Proper ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Inclusive containment: `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// True when the node is the root or reaches it through parent links.
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == Self::ROOT || self.ancestors(id).any(|a| a == Self::ROOT)
    }

    /// Relative tree order of two nodes; `None` when they live in different
    /// trees (for example one of them is detached). Ancestors sort first.
    pub fn tree_order(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        if a == b {
            return Some(Ordering::Equal);
        }
        let (top_a, path_a) = self.path_from_top(a);
        let (top_b, path_b) = self.path_from_top(b);
        (top_a == top_b).then(|| path_a.cmp(&path_b))
    }

    fn path_from_top(&self, id: NodeId) -> (NodeId, Vec<usize>) {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(self.index_in_parent(current).unwrap_or(0));
            current = parent;
        }
        path.reverse();
        (current, path)
    }

    /// Descendants of `id` in tree order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => out.push_str(text),
            Some(NodeKind::Element(_)) | Some(NodeKind::Document { .. }) => {
                for child in self.children(id) {
                    self.collect_text(*child, out);
                }
            }
            _ => {}
        }
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    /// Append `child` to `parent`, moving it out of its current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference` (or at the end when
    /// `reference` is `None`), moving it out of its current parent first.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        if !self.record(parent)?.kind.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        self.record(child)?;
        if child == Self::ROOT {
            return Err(DomError::RootNotMovable);
        }
        if self.contains(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        let reference = match reference {
            Some(r) if r == child => self.next_sibling(child),
            other => other,
        };
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
        }

        self.unlink(child);

        let siblings = &mut self.nodes[parent.index()].children;
        let pos = match reference {
            Some(r) => siblings
                .iter()
                .position(|k| *k == r)
                .ok_or(DomError::NotAChild { parent, child: r })?,
            None => siblings.len(),
        };
        siblings.insert(pos, child);
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|k| *k != id);
        }
    }

    /// Remove `id` from its parent. The subtree stays intact and addressable.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        self.record(id)?;
        if id == Self::ROOT {
            return Err(DomError::RootNotMovable);
        }
        self.unlink(id);
        Ok(())
    }

    /// Replace `id` with its children, preserving their order and position.
    pub fn replace_with_children(&mut self, id: NodeId) -> Result<(), DomError> {
        let parent = self.parent(id).ok_or(DomError::Detached(id))?;
        let children = std::mem::take(&mut self.record_mut(id)?.children);
        for child in &children {
            self.nodes[child.index()].parent = None;
            self.insert_before(parent, *child, Some(id))?;
        }
        self.unlink(id);
        log::trace!(target: "html.dom", "unwrapped node {} ({} children)", id.0, children.len());
        Ok(())
    }

    /// Put `wrapper` where `node` is and move `node` inside it.
    pub fn wrap(&mut self, node: NodeId, wrapper: NodeId) -> Result<(), DomError> {
        let parent = self.parent(node).ok_or(DomError::Detached(node))?;
        self.insert_before(parent, wrapper, Some(node))?;
        self.append_child(wrapper, node)
    }

    /// Copy a node into a new detached slot; `deep` also copies the subtree.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId, DomError> {
        let kind = self.record(id)?.kind.clone();
        let copy = self.push(kind);
        if deep {
            let children = self.children(id).to_vec();
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(copy, child_copy)?;
            }
        }
        Ok(copy)
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
        let p = doc.create_element("p");
        let a = doc.create_text("one ");
        let b = doc.create_text("two");
        doc.append_child(doc.root(), p).unwrap();
        doc.append_child(p, a).unwrap();
        doc.append_child(p, b).unwrap();
        (p, a, b)
    }

    #[test]
    fn append_moves_node_from_previous_parent() {
        let mut doc = Document::new();
        let (p, a, b) = para(&mut doc);
        let div = doc.create_element("div");
        doc.append_child(doc.root(), div).unwrap();
        doc.append_child(div, a).unwrap();

        assert_eq!(doc.children(p), &[b]);
        assert_eq!(doc.children(div), &[a]);
        assert_eq!(doc.parent(a), Some(div));
    }

    #[test]
    fn insert_before_rejects_cycles() {
        let mut doc = Document::new();
        let (p, _, _) = para(&mut doc);
        let inner = doc.create_element("b");
        doc.append_child(p, inner).unwrap();

        assert_eq!(
            doc.append_child(inner, p),
            Err(DomError::CycleDetected {
                parent: inner,
                child: p
            })
        );
        assert_eq!(doc.append_child(p, p), Err(DomError::CycleDetected { parent: p, child: p }));
    }

    #[test]
    fn insert_before_rejects_foreign_reference_and_text_parents() {
        let mut doc = Document::new();
        let (p, a, _) = para(&mut doc);
        let stray = doc.create_text("x");
        let other = doc.create_element("div");

        assert_eq!(
            doc.insert_before(other, stray, Some(a)),
            Err(DomError::NotAChild {
                parent: other,
                child: a
            })
        );
        assert_eq!(doc.append_child(a, stray), Err(DomError::InvalidParent(a)));
        assert_eq!(doc.children(p).len(), 2);
    }

    #[test]
    fn wrap_and_unwrap_restore_structure() {
        let mut doc = Document::new();
        let (p, a, b) = para(&mut doc);
        let span = doc.create_element("span");

        doc.wrap(a, span).unwrap();
        assert_eq!(doc.children(p), &[span, b]);
        assert_eq!(doc.children(span), &[a]);

        doc.replace_with_children(span).unwrap();
        assert_eq!(doc.children(p), &[a, b]);
        assert_eq!(doc.parent(span), None);
        assert!(!doc.has_children(span));
    }

    #[test]
    fn siblings_and_ancestors() {
        let mut doc = Document::new();
        let (p, a, b) = para(&mut doc);

        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.previous_sibling(b), Some(a));
        assert_eq!(doc.previous_sibling(a), None);
        assert_eq!(doc.ancestors(a).collect::<Vec<_>>(), vec![p, doc.root()]);
        assert!(doc.contains(p, a));
        assert!(doc.contains(a, a));
        assert!(!doc.contains(a, p));
    }

    #[test]
    fn deep_clone_is_detached_copy() {
        let mut doc = Document::new();
        let (p, _, _) = para(&mut doc);
        let copy = doc.clone_node(p, true).unwrap();

        assert_eq!(doc.parent(copy), None);
        assert!(!doc.is_connected(copy));
        assert_eq!(doc.text_content(copy), "one two");
        let shallow = doc.clone_node(p, false).unwrap();
        assert!(!doc.has_children(shallow));
    }

    #[test]
    fn detach_keeps_subtree_and_disconnects() {
        let mut doc = Document::new();
        let (p, a, _) = para(&mut doc);
        doc.detach(p).unwrap();

        assert!(!doc.is_connected(a));
        assert_eq!(doc.parent(a), Some(p));
        assert_eq!(doc.text_content(doc.root()), "");
        assert_eq!(doc.detach(doc.root()), Err(DomError::RootNotMovable));
    }

    #[test]
    fn tree_order_compares_positions() {
        let mut doc = Document::new();
        let (p, a, b) = para(&mut doc);
        let stray = doc.create_text("x");

        assert_eq!(doc.tree_order(a, b), Some(Ordering::Less));
        assert_eq!(doc.tree_order(b, a), Some(Ordering::Greater));
        assert_eq!(doc.tree_order(p, a), Some(Ordering::Less));
        assert_eq!(doc.tree_order(a, a), Some(Ordering::Equal));
        assert_eq!(doc.tree_order(a, stray), None);
    }

    #[test]
    fn descendants_are_in_tree_order() {
        let mut doc = Document::new();
        let (p, a, b) = para(&mut doc);
        let em = doc.create_element("em");
        let c = doc.create_text("three");
        doc.insert_before(p, em, Some(b)).unwrap();
        doc.append_child(em, c).unwrap();

        assert_eq!(doc.descendants(p), vec![a, em, c, b]);
        assert_eq!(doc.text_content(p), "one threetwo");
    }
}
