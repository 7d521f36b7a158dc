//! Post-processing of freshly created markers.
//!
//! Flattening guarantees that no marker sits inside another marker of the same
//! style; merging joins sibling markers of the same style into one. Both move
//! existing nodes rather than cloning them, so every handle stays valid.

use crate::error::HighlightError;
use crate::style::Style;
use html::{Document, DomError, NodeId};

fn is_marker(doc: &Document, id: NodeId, class: &str) -> bool {
    doc.has_class(id, class)
}

fn is_blank_text(doc: &Document, id: NodeId) -> bool {
    doc.text(id).is_some_and(|t| t.trim().is_empty())
}

/// Flatten, optionally merge, and return the markers still in the document.
pub fn normalize_highlights(
    doc: &mut Document,
    context: NodeId,
    markers: Vec<NodeId>,
    marker_class: &str,
    merge: bool,
) -> Result<Vec<NodeId>, HighlightError> {
    flatten_nested(doc, context, &markers, marker_class)?;
    if merge {
        merge_siblings(doc, &markers, marker_class)?;
    }
    let kept: Vec<NodeId> = markers
        .into_iter()
        .filter(|&m| doc.is_connected(m))
        .collect();
    log::debug!(target: "highlight.normalize", "{} markers after normalization", kept.len());
    Ok(kept)
}

/// Resolve markers nested inside other markers.
///
/// Same style as the enclosing marker: the inner one is unwrapped. Different
/// style directly inside a marker: that marker is split around the inner one.
/// Afterwards same-style markers nested inside the given markers are
/// unwrapped as well.
pub fn flatten_nested(
    doc: &mut Document,
    context: NodeId,
    markers: &[NodeId],
    marker_class: &str,
) -> Result<(), HighlightError> {
    for &marker in markers {
        if !doc.is_connected(marker) {
            continue;
        }
        let Some(parent) = doc.parent(marker) else {
            continue;
        };
        let style = Style::of(doc, marker);

        if is_marker(doc, parent, marker_class) {
            if Style::of(doc, parent) == style {
                log::trace!(target: "highlight.normalize", "unwrap {} into same-style parent", marker.0);
                doc.replace_with_children(marker)?;
            } else {
                split_around(doc, parent, marker)?;
            }
            continue;
        }

        let covered = doc
            .ancestors(marker)
            .take_while(|&a| a != context)
            .any(|a| is_marker(doc, a, marker_class) && Style::of(doc, a) == style);
        if covered {
            log::trace!(target: "highlight.normalize", "unwrap {} inside same-style ancestor", marker.0);
            doc.replace_with_children(marker)?;
        }
    }

    for &marker in markers {
        if !doc.is_connected(marker) {
            continue;
        }
        let style = Style::of(doc, marker);
        let nested: Vec<NodeId> = doc
            .descendants(marker)
            .into_iter()
            .filter(|&d| is_marker(doc, d, marker_class) && Style::of(doc, d) == style)
            .collect();
        for inner in nested {
            doc.replace_with_children(inner)?;
        }
    }
    Ok(())
}

// Split `outer` so that `inner` (one of its children) becomes a sibling placed
// between a shallow clone holding the preceding children and `outer` holding
// the rest. Blank text at the split edges moves out next to `inner`.
fn split_around(doc: &mut Document, outer: NodeId, inner: NodeId) -> Result<(), HighlightError> {
    let container = doc.parent(outer).ok_or(DomError::Detached(outer))?;
    let before = doc.clone_node(outer, false)?;
    doc.insert_before(container, before, Some(outer))?;

    while let Some(first) = doc.first_child(outer) {
        if first == inner {
            break;
        }
        doc.append_child(before, first)?;
    }
    if let Some(last) = doc.last_child(before)
        && is_blank_text(doc, last)
    {
        doc.insert_before(container, last, Some(outer))?;
    }
    doc.insert_before(container, inner, Some(outer))?;
    if let Some(first) = doc.first_child(outer)
        && is_blank_text(doc, first)
    {
        doc.insert_before(container, first, Some(outer))?;
    }

    for piece in [before, outer] {
        if !doc.has_children(piece) {
            doc.detach(piece)?;
        }
    }
    log::trace!(target: "highlight.normalize", "split marker {} around {}", outer.0, inner.0);
    Ok(())
}

/// Absorb neighbouring same-style markers into each marker, first from the
/// front and then from the back, until no neighbour qualifies.
///
/// Neighbours are the nearest element siblings. Blank text and comments in
/// between are moved into the merged marker; any other node in between stops
/// the merge.
pub fn merge_siblings(
    doc: &mut Document,
    markers: &[NodeId],
    marker_class: &str,
) -> Result<(), HighlightError> {
    for &marker in markers {
        if doc.is_connected(marker) {
            while absorb(doc, marker, marker_class, Side::Before)? {}
        }
    }
    for &marker in markers {
        if doc.is_connected(marker) {
            while absorb(doc, marker, marker_class, Side::After)? {}
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Side {
    Before,
    After,
}

// Nodes strictly between `marker` and its nearest element sibling on `side`,
// nearest first, plus that sibling. `None` when a non-blank text node is in
// the way or no element sibling exists.
fn neighbour(doc: &Document, marker: NodeId, side: Side) -> Option<(NodeId, Vec<NodeId>)> {
    let step = |id| match side {
        Side::Before => doc.previous_sibling(id),
        Side::After => doc.next_sibling(id),
    };
    let mut between = Vec::new();
    let mut current = step(marker)?;
    loop {
        if doc.is_element(current) {
            return Some((current, between));
        }
        if doc.is_text(current) && !is_blank_text(doc, current) {
            return None;
        }
        between.push(current);
        current = step(current)?;
    }
}

fn absorb(
    doc: &mut Document,
    marker: NodeId,
    marker_class: &str,
    side: Side,
) -> Result<bool, HighlightError> {
    let Some((sibling, between)) = neighbour(doc, marker, side) else {
        return Ok(false);
    };
    let same = is_marker(doc, sibling, marker_class)
        && Style::of(doc, sibling) == Style::of(doc, marker);
    if !same {
        return Ok(false);
    }

    let sibling_children = doc.children(sibling).to_vec();
    match side {
        Side::Before => {
            // Final order: sibling content, in-between nodes, own content.
            let anchor = doc.first_child(marker);
            for node in sibling_children
                .into_iter()
                .chain(between.into_iter().rev())
            {
                doc.insert_before(marker, node, anchor)?;
            }
        }
        Side::After => {
            for node in between.into_iter().chain(sibling_children) {
                doc.append_child(marker, node)?;
            }
        }
    }
    doc.detach(sibling)?;
    log::trace!(target: "highlight.normalize", "marker {} absorbed {}", marker.0, sibling.0);
    Ok(true)
}
