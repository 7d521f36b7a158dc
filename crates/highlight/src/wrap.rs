use crate::error::HighlightError;
use crate::range::Range;
use html::{Document, NodeId, TreeWalker, is_ignorable_element};

/// Wrap every non-blank text node covered by `range` in a deep clone of
/// `template`.
///
/// The marker goes around the text node's parent element, so inline
/// formatting and word spans end up inside it. When the parent is the context
/// itself or already a marker (`marker_class`), the text node is wrapped
/// directly instead. Text outside `context` is left alone.
///
/// Returns the created markers in document order.
pub fn wrap_range(
    doc: &mut Document,
    context: NodeId,
    range: &Range,
    template: NodeId,
    marker_class: &str,
) -> Result<Vec<NodeId>, HighlightError> {
    if range.is_collapsed() {
        return Ok(Vec::new());
    }
    let Some((first, last)) = range.bounds(doc) else {
        log::debug!(target: "highlight.wrap", "range covers no nodes");
        return Ok(Vec::new());
    };

    let texts: Vec<NodeId> = TreeWalker::new(doc, first, last, is_ignorable_element)
        .filter(|&id| doc.text(id).is_some_and(|t| !t.trim().is_empty()))
        .collect();

    let mut markers = Vec::with_capacity(texts.len());
    for text in texts {
        let Some(parent) = doc.parent(text) else {
            continue;
        };
        if !doc.contains(context, parent) {
            log::trace!(target: "highlight.wrap", "text {} is outside the context", text.0);
            continue;
        }
        let target = if parent == context || doc.has_class(parent, marker_class) {
            text
        } else {
            parent
        };
        let marker = doc.clone_node(template, true)?;
        doc.wrap(target, marker)?;
        log::trace!(target: "highlight.wrap", "marker {} wraps node {}", marker.0, target.0);
        markers.push(marker);
    }

    log::debug!(target: "highlight.wrap", "created {} markers", markers.len());
    Ok(markers)
}
