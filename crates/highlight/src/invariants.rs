use crate::error::HighlightError;
use html::{Document, NodeId};

/// Structural checks run after every highlight and removal in debug builds:
/// every marker under `context` has content, and the text under `context`
/// equals `expected_text`.
pub fn check_invariants(
    doc: &Document,
    context: NodeId,
    expected_text: &str,
    marker_class: &str,
) -> Result<(), HighlightError> {
    if let Some(empty) = doc
        .descendants(context)
        .into_iter()
        .find(|&id| doc.has_class(id, marker_class) && !doc.has_children(id))
    {
        return Err(HighlightError::InvariantViolation {
            detail: format!("marker {} has no children", empty.0),
        });
    }
    let actual = doc.text_content(context);
    if actual != expected_text {
        return Err(HighlightError::InvariantViolation {
            detail: format!("text changed from {expected_text:?} to {actual:?}"),
        });
    }
    Ok(())
}
