//! Ranges over the arena with DOM boundary semantics.
//!
//! A boundary offset counts children for container nodes and bytes for text
//! and comment nodes. Resolving a range to the first and last node it covers
//! is what the wrapper walks between.

use html::{Document, DomError, NodeId, NodeKind, TreeWalker};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

impl Boundary {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub start: Boundary,
    pub end: Boundary,
}

impl Range {
    pub fn new(start: Boundary, end: Boundary) -> Self {
        Self { start, end }
    }

    pub fn collapsed(at: Boundary) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// A range spanning all content of `node`.
    pub fn select_node_contents(doc: &Document, node: NodeId) -> Self {
        Self::new(
            Boundary::new(node, 0),
            Boundary::new(node, node_length(doc, node)),
        )
    }

    /// A range from just before `first` to just after `last`.
    pub fn around(doc: &Document, first: NodeId, last: NodeId) -> Result<Self, DomError> {
        let mut range = Self::collapsed(Boundary::new(first, 0));
        range.set_start_before(doc, first)?;
        range.set_end_after(doc, last)?;
        Ok(range)
    }

    pub fn set_start_before(&mut self, doc: &Document, node: NodeId) -> Result<(), DomError> {
        let (parent, index) = position(doc, node)?;
        self.start = Boundary::new(parent, index);
        Ok(())
    }

    pub fn set_end_after(&mut self, doc: &Document, node: NodeId) -> Result<(), DomError> {
        let (parent, index) = position(doc, node)?;
        self.end = Boundary::new(parent, index + 1);
        Ok(())
    }

    /// First node whose content lies inside the range.
    pub fn start_node(&self, doc: &Document) -> Option<NodeId> {
        let Boundary { node, offset } = self.start;
        if is_character_data(doc, node) {
            let len = node_length(doc, node);
            if offset < len || len == 0 {
                Some(node)
            } else {
                following(doc, node)
            }
        } else {
            doc.children(node)
                .get(offset)
                .copied()
                .or_else(|| following(doc, node))
        }
    }

    /// Last node whose content lies inside the range. When this is a
    /// container, everything inside it is covered.
    pub fn end_node(&self, doc: &Document) -> Option<NodeId> {
        let Boundary { node, offset } = self.end;
        if is_character_data(doc, node) {
            if offset > 0 || node_length(doc, node) == 0 {
                Some(node)
            } else {
                preceding(doc, node)
            }
        } else {
            let len = doc.children(node).len();
            match offset.min(len) {
                0 => preceding(doc, node),
                n => doc.children(node).get(n - 1).copied(),
            }
        }
    }

    /// `(start_node, end_node)` when the range covers at least one node in
    /// order. A last node that contains the first (the range ends after the
    /// rest of an ancestor) counts as ordered.
    pub fn bounds(&self, doc: &Document) -> Option<(NodeId, NodeId)> {
        let first = self.start_node(doc)?;
        let last = self.end_node(doc)?;
        let ordered = doc.contains(last, first)
            || doc
                .tree_order(first, last)
                .is_some_and(|order| order != Ordering::Greater);
        ordered.then_some((first, last))
    }

    /// Plain text covered by the range.
    pub fn text(&self, doc: &Document) -> String {
        let mut out = String::new();
        if self.is_collapsed() {
            return out;
        }
        let Some((first, last)) = self.bounds(doc) else {
            return out;
        };
        for id in TreeWalker::new(doc, first, last, |_: &Document, _: NodeId| false) {
            let Some(text) = doc.text(id) else {
                continue;
            };
            let from = if id == self.start.node {
                char_floor(text, self.start.offset)
            } else {
                0
            };
            let to = if id == self.end.node {
                char_floor(text, self.end.offset)
            } else {
                text.len()
            };
            if from < to {
                out.push_str(&text[from..to]);
            }
        }
        out
    }

    /// Range over byte offsets `start..end` of `doc.text_content(within)`.
    pub fn from_text_offsets(
        doc: &Document,
        within: NodeId,
        start: usize,
        end: usize,
    ) -> Option<Self> {
        if start > end {
            return None;
        }
        let mut pos = 0;
        let mut start_boundary = None;
        let mut end_boundary = None;
        for id in std::iter::once(within).chain(doc.descendants(within)) {
            let Some(text) = doc.text(id) else {
                continue;
            };
            let len = text.len();
            if start_boundary.is_none() && start < pos + len {
                start_boundary = Some(Boundary::new(id, start - pos));
            }
            if end_boundary.is_none() && end > pos && end <= pos + len {
                end_boundary = Some(Boundary::new(id, end - pos));
            }
            pos += len;
        }
        if start == end {
            return start_boundary.map(Self::collapsed);
        }
        Some(Self::new(start_boundary?, end_boundary?))
    }

    /// Range over the first occurrence of `needle` in the text under `within`.
    pub fn find_text(doc: &Document, within: NodeId, needle: &str) -> Option<Self> {
        let start = doc.text_content(within).find(needle)?;
        Self::from_text_offsets(doc, within, start, start + needle.len())
    }
}

fn position(doc: &Document, node: NodeId) -> Result<(NodeId, usize), DomError> {
    let parent = doc.parent(node).ok_or(DomError::Detached(node))?;
    let index = doc.index_in_parent(node).ok_or(DomError::Detached(node))?;
    Ok((parent, index))
}

fn is_character_data(doc: &Document, node: NodeId) -> bool {
    matches!(
        doc.kind(node),
        Some(NodeKind::Text(_)) | Some(NodeKind::Comment(_))
    )
}

fn node_length(doc: &Document, node: NodeId) -> usize {
    match doc.kind(node) {
        Some(NodeKind::Text(text)) | Some(NodeKind::Comment(text)) => text.len(),
        _ => doc.children(node).len(),
    }
}

// Next node in tree order that is not inside `node`.
fn following(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut current = node;
    loop {
        if let Some(next) = doc.next_sibling(current) {
            return Some(next);
        }
        current = doc.parent(current)?;
    }
}

// Nearest earlier node that is neither `node` nor one of its ancestors.
fn preceding(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut current = node;
    loop {
        if let Some(prev) = doc.previous_sibling(current) {
            return Some(prev);
        }
        current = doc.parent(current)?;
    }
}

fn char_floor(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
