//! Lifecycle callbacks around highlighting and removal.

use crate::range::Range;
use html::{Document, NodeId};

/// Injected strategy consulted by the [`Highlighter`](crate::Highlighter).
///
/// All methods have permissive defaults; implement only what you need.
pub trait HighlightHooks {
    /// Return `false` to veto highlighting `range`; the tree is left untouched.
    fn before_highlight(&mut self, _doc: &Document, _range: &Range) -> bool {
        true
    }

    /// Called with the normalized markers and the text that was selected.
    fn after_highlight(&mut self, _doc: &Document, _markers: &[NodeId], _text: &str) {}

    /// Return `false` to keep `marker` during a removal.
    fn before_remove(&mut self, _doc: &Document, _marker: NodeId) -> bool {
        true
    }
}

/// Accepts everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

impl HighlightHooks for DefaultHooks {}
