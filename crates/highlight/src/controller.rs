//! The highlighter attached to one context element of a host document.

use crate::adapter::DocumentAdapter;
use crate::config::HighlighterConfig;
use crate::error::HighlightError;
use crate::hooks::{DefaultHooks, HighlightHooks};
use crate::invariants::check_invariants;
use crate::normalize::normalize_highlights;
use crate::range::Range;
use crate::touch::{Gesture, TouchSample, TouchTracker};
use crate::words::{unwrap_words, wrap_words};
use crate::wrap::wrap_range;
use core_types::{EventOutcome, TouchEvent, TouchPhase};
use html::{Document, NodeId, inner_html_unwrapping};
use std::cmp::Ordering;

/// Result of a highlight that went through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightOutcome {
    /// Markers left after normalization, in document order. Empty when the
    /// range covered no highlightable text inside the context.
    pub markers: Vec<NodeId>,
    /// Text of the range as it was selected.
    pub text: String,
}

pub struct Highlighter<H, K = DefaultHooks> {
    host: H,
    context: NodeId,
    config: HighlighterConfig,
    hooks: K,
    enabled: bool,
    touches: TouchTracker,
    /// Detached marker prototype, cloned for every new marker.
    template: NodeId,
}

impl<H: DocumentAdapter> Highlighter<H> {
    pub fn with_defaults(host: H, context: NodeId) -> Result<Self, HighlightError> {
        Self::attach(host, context, HighlighterConfig::default(), DefaultHooks)
    }
}

impl<H: DocumentAdapter, K: HighlightHooks> Highlighter<H, K> {
    /// Take over `context`: mark it with the context class and wrap its words
    /// for touch resolution. Starts disabled when `config.disabled` is set.
    pub fn attach(
        mut host: H,
        context: NodeId,
        config: HighlighterConfig,
        hooks: K,
    ) -> Result<Self, HighlightError> {
        let doc = host.document_mut();
        if !doc.is_element(context) || !doc.is_connected(context) {
            return Err(HighlightError::InvalidContext(context));
        }
        if let Some(el) = doc.element_mut(context) {
            el.add_class(&config.context_class);
        }
        wrap_words(doc, context, &config.touch_class)?;
        let template = config.marker_template(doc);
        log::debug!(target: "highlight.controller", "attached to node {}", context.0);

        Ok(Self {
            host,
            context,
            enabled: !config.disabled,
            config,
            hooks,
            touches: TouchTracker::new(),
            template,
        })
    }

    /// Detach from the context: unwrap every marker, undo word wrapping and
    /// hand the host back.
    pub fn destroy(self) -> Result<H, HighlightError> {
        let Self {
            mut host,
            context,
            config,
            ..
        } = self;
        let doc = host.document_mut();
        for marker in markers_in(doc, context, &config.highlighted_class) {
            if doc.parent(marker).is_some() {
                doc.replace_with_children(marker)?;
            }
        }
        unwrap_words(doc, context, &config.touch_class)?;
        if let Some(el) = doc.element_mut(context) {
            el.remove_class(&config.context_class);
        }
        log::debug!(target: "highlight.controller", "detached from node {}", context.0);
        Ok(host)
    }

    /// Highlight `explicit`, or the host selection when `None`.
    ///
    /// Returns `Ok(None)` when disabled, when there is nothing to highlight,
    /// or when `before_highlight` vetoes. The host selection is cleared in
    /// every case but the disabled one.
    pub fn highlight(
        &mut self,
        explicit: Option<Range>,
    ) -> Result<Option<HighlightOutcome>, HighlightError> {
        if !self.enabled {
            return Ok(None);
        }
        if explicit.is_some() {
            self.host.clear_selection();
        }
        let range = explicit.or_else(|| self.host.active_range());
        let result = self.highlight_range(range);
        self.host.clear_selection();
        result
    }

    fn highlight_range(
        &mut self,
        range: Option<Range>,
    ) -> Result<Option<HighlightOutcome>, HighlightError> {
        let Some(range) = range.filter(|r| !r.is_collapsed()) else {
            log::debug!(target: "highlight.controller", "no range to highlight");
            return Ok(None);
        };
        let doc = self.host.document();
        let text = range.text(doc);
        if !self.hooks.before_highlight(doc, &range) {
            log::debug!(target: "highlight.controller", "highlight vetoed");
            return Ok(None);
        }
        let expected = cfg!(debug_assertions).then(|| doc.text_content(self.context));

        let class = &self.config.highlighted_class;
        let doc = self.host.document_mut();
        let created = wrap_range(doc, self.context, &range, self.template, class)?;
        let markers = normalize_highlights(
            doc,
            self.context,
            created,
            class,
            self.config.merge_highlights,
        )?;
        if let Some(expected) = expected {
            check_invariants(doc, self.context, &expected, class)?;
        }

        self.hooks.after_highlight(doc, &markers, &text);
        log::debug!(
            target: "highlight.controller",
            "highlighted {:?} with {} markers",
            text,
            markers.len()
        );
        Ok(Some(HighlightOutcome { markers, text }))
    }

    /// Mouse-up entry point: highlight the host selection.
    pub fn on_pointer_up(&mut self) -> Result<Option<HighlightOutcome>, HighlightError> {
        self.highlight(None)
    }

    /// Unwrap the markers under `scope` (default: the context), including
    /// `scope` itself when it is a marker, unless `before_remove` keeps them.
    /// Returns how many were removed.
    pub fn remove_highlights(&mut self, scope: Option<NodeId>) -> Result<usize, HighlightError> {
        let scope = scope.unwrap_or(self.context);
        let class = &self.config.highlighted_class;
        let expected = cfg!(debug_assertions).then(|| self.host.document().text_content(self.context));

        let mut removed = 0;
        for marker in markers_in(self.host.document(), scope, class) {
            if !self.hooks.before_remove(self.host.document(), marker) {
                log::trace!(target: "highlight.controller", "kept marker {}", marker.0);
                continue;
            }
            let doc = self.host.document_mut();
            if doc.parent(marker).is_none() {
                continue;
            }
            doc.replace_with_children(marker)?;
            removed += 1;
        }

        if let Some(expected) = expected {
            check_invariants(self.host.document(), self.context, &expected, class)?;
        }
        log::debug!(target: "highlight.controller", "removed {removed} markers");
        Ok(removed)
    }

    /// Markers under `scope` (default: the context), including `scope`
    /// itself when it is a marker, in document order.
    pub fn highlights(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        markers_in(
            self.host.document(),
            scope.unwrap_or(self.context),
            &self.config.highlighted_class,
        )
    }

    pub fn is_highlight(&self, node: NodeId) -> bool {
        self.host
            .document()
            .has_class(node, &self.config.highlighted_class)
    }

    /// Colour used for highlights created from now on.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.config.color = color.into();
        let style = self.config.marker_style();
        if let Some(el) = self.host.document_mut().element_mut(self.template) {
            el.set_attribute("style", style);
        }
    }

    pub fn color(&self) -> &str {
        &self.config.color
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn context(&self) -> NodeId {
        self.context
    }

    pub fn config(&self) -> &HighlighterConfig {
        &self.config
    }

    pub fn hooks(&self) -> &K {
        &self.hooks
    }

    /// Touches started but not yet ended.
    pub fn touch_tracker(&self) -> &TouchTracker {
        &self.touches
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Inner markup of the context with word spans stripped. The live tree
    /// is not modified.
    pub fn serialize(&self) -> String {
        let class = &self.config.touch_class;
        inner_html_unwrapping(self.host.document(), self.context, |doc, id| {
            doc.is_element_named(id, "span") && doc.has_class(id, class)
        })
    }

    /// Feed a touch start or end. Touches on existing highlights are ignored;
    /// a completed gesture highlights from its start word to its end word
    /// unless it counts as a vertical scroll.
    pub fn on_touch(&mut self, event: &TouchEvent<NodeId>) -> Result<EventOutcome, HighlightError> {
        if !self.enabled {
            return Ok(EventOutcome::PASS_THROUGH);
        }
        let mut scrolled = false;

        for touch in &event.changed {
            let resolved = self
                .host
                .nearest(touch.position, &self.config.touch_class);
            if let Some(target) = touch.target.or(resolved)
                && self.on_highlight(target)
            {
                log::trace!(target: "highlight.touch", "touch {} on a highlight", touch.id.0);
                continue;
            }
            let sample = TouchSample {
                position: touch.position,
                target: resolved,
            };

            match event.phase {
                TouchPhase::Start => self.touches.begin(touch.id, sample),
                TouchPhase::End => {
                    let Some(record) = self.touches.finish(touch.id) else {
                        log::trace!(target: "highlight.touch", "touch {} ended without a start", touch.id.0);
                        continue;
                    };
                    match Gesture::classify(&record.start, &sample, self.config.allow_vertical_scroll) {
                        Gesture::Scroll => {
                            log::trace!(target: "highlight.touch", "touch {} is a scroll", touch.id.0);
                            scrolled = true;
                        }
                        Gesture::Select { start, end } => self.touch_highlight(start, end)?,
                        Gesture::Unresolved => {
                            log::trace!(target: "highlight.touch", "touch {} hit no word", touch.id.0);
                        }
                    }
                }
            }
        }

        Ok(EventOutcome {
            prevent_default: self.config.prevent_default && !scrolled,
        })
    }

    /// `target` is a marker or sits anywhere inside one below the context.
    fn on_highlight(&self, target: NodeId) -> bool {
        std::iter::once(target)
            .chain(self.host.document().ancestors(target))
            .take_while(|&node| node != self.context)
            .any(|node| self.is_highlight(node))
    }

    fn touch_highlight(&mut self, start: NodeId, end: NodeId) -> Result<(), HighlightError> {
        let doc = self.host.document();
        if !doc.is_connected(start) || !doc.is_connected(end) {
            return Ok(());
        }
        let (first, last) = match doc.tree_order(start, end) {
            Some(Ordering::Greater) => (end, start),
            _ => (start, end),
        };
        let range = Range::around(doc, first, last)?;
        self.highlight(Some(range))?;
        Ok(())
    }
}

fn markers_in(doc: &Document, scope: NodeId, class: &str) -> Vec<NodeId> {
    std::iter::once(scope)
        .chain(doc.descendants(scope))
        .filter(|&id| doc.has_class(id, class))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MemoryHost;

    fn attached(markup: &str) -> Highlighter<MemoryHost> {
        let host = MemoryHost::from_markup(markup);
        let context = host.document().first_child(host.document().root()).unwrap();
        Highlighter::with_defaults(host, context).unwrap()
    }

    #[test]
    fn attach_marks_context_and_wraps_words() {
        let hl = attached("<div><p>one two</p></div>");
        let doc = hl.host().document();

        assert!(doc.has_class(hl.context(), "highlighter-context"));
        assert_eq!(
            hl.host()
                .document()
                .descendants(hl.context())
                .into_iter()
                .filter(|&id| doc.has_class(id, "touch"))
                .count(),
            2
        );
        assert_eq!(hl.serialize(), "<p>one two</p>");
    }

    #[test]
    fn text_nodes_cannot_be_contexts() {
        let host = MemoryHost::from_markup("loose text");
        let text = host.document().first_child(host.document().root()).unwrap();
        assert!(matches!(
            Highlighter::with_defaults(host, text),
            Err(HighlightError::InvalidContext(id)) if id == text
        ));
    }

    #[test]
    fn selection_is_highlighted_and_cleared() {
        let mut hl = attached("<div><p>one two three</p></div>");
        let ctx = hl.context();
        let range = Range::find_text(hl.host().document(), ctx, "two").unwrap();
        hl.host_mut().select(range);

        let outcome = hl.on_pointer_up().unwrap().unwrap();

        assert_eq!(outcome.text, "two");
        assert_eq!(outcome.markers.len(), 1);
        assert_eq!(hl.highlights(None), outcome.markers);
        assert!(hl.host().selection().is_none());
        assert_eq!(
            hl.serialize(),
            r#"<p>one <span class="highlighted" style="background-color: #ffff7b;">two</span> three</p>"#
        );
    }

    #[test]
    fn disabled_highlighter_ignores_input() {
        let mut hl = attached("<div><p>one</p></div>");
        let ctx = hl.context();
        let range = Range::find_text(hl.host().document(), ctx, "one").unwrap();
        hl.host_mut().select(range);
        hl.disable();

        assert_eq!(hl.on_pointer_up().unwrap(), None);
        assert!(hl.host().selection().is_some());
        assert!(hl.highlights(None).is_empty());

        hl.enable();
        assert!(hl.on_pointer_up().unwrap().is_some());
    }

    #[test]
    fn color_changes_apply_to_new_markers() {
        let mut hl = attached("<div><p>one two</p></div>");
        let ctx = hl.context();
        hl.set_color("red");
        assert_eq!(hl.color(), "red");
        let range = Range::find_text(hl.host().document(), ctx, "one").unwrap();
        hl.highlight(Some(range)).unwrap();

        assert_eq!(
            hl.serialize(),
            r#"<p><span class="highlighted" style="background-color: red;">one</span> two</p>"#
        );
    }

    #[test]
    fn highlights_reuse_one_marker_template() {
        let host = MemoryHost::from_markup("<div><p>in</p></div><p>out</p>");
        let mut hl = Highlighter::with_defaults(host, NodeId(1)).unwrap();
        let slots = hl.host().document().slot_count();

        for _ in 0..50 {
            let doc = hl.host().document();
            let range = Range::find_text(doc, doc.root(), "out").unwrap();
            let outcome = hl.highlight(Some(range)).unwrap().unwrap();
            assert!(outcome.markers.is_empty());
        }
        hl.set_color("red");
        hl.set_color("#ffff7b");

        assert_eq!(hl.host().document().slot_count(), slots);
    }

    #[test]
    fn destroy_restores_markup_and_returns_host() {
        let markup = "<div><p>one <b>two</b> three</p></div>";
        let mut hl = attached(markup);
        let ctx = hl.context();
        let range = Range::find_text(hl.host().document(), ctx, "ne tw").unwrap();
        hl.highlight(Some(range)).unwrap().unwrap();

        let host = hl.destroy().unwrap();
        let doc = host.document();
        assert_eq!(html::inner_html(doc, doc.root()), markup);
    }
}
