//! Touch gesture bookkeeping: a start sample per touch id, consumed by the
//! matching end.

use core_types::{Point, TouchId};
use html::NodeId;
use std::collections::HashMap;

/// A touch position together with the word span it resolved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub position: Point,
    pub target: Option<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchRecord {
    pub start: TouchSample,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// A mostly vertical swipe the page should scroll for.
    Scroll,
    Select { start: NodeId, end: NodeId },
    /// One of the endpoints did not resolve to a word.
    Unresolved,
}

impl Gesture {
    pub fn classify(start: &TouchSample, end: &TouchSample, allow_vertical_scroll: bool) -> Gesture {
        let (dx, dy) = start.position.displacement(end.position);
        if allow_vertical_scroll && dy > dx {
            return Gesture::Scroll;
        }
        match (start.target, end.target) {
            (Some(start), Some(end)) => Gesture::Select { start, end },
            _ => Gesture::Unresolved,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    touches: HashMap<TouchId, TouchRecord>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch start; a repeated start for the same id replaces it.
    pub fn begin(&mut self, id: TouchId, sample: TouchSample) {
        self.touches.insert(id, TouchRecord { start: sample });
    }

    /// Consume the record for `id`.
    pub fn finish(&mut self, id: TouchId) -> Option<TouchRecord> {
        self.touches.remove(&id)
    }

    pub fn is_tracking(&self, id: TouchId) -> bool {
        self.touches.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn clear(&mut self) {
        self.touches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f32, y: f32, target: Option<u32>) -> TouchSample {
        TouchSample {
            position: Point::new(x, y),
            target: target.map(NodeId),
        }
    }

    #[test]
    fn records_are_consumed_once() {
        let mut tracker = TouchTracker::new();
        tracker.begin(TouchId(1), sample(0.0, 0.0, Some(3)));
        tracker.begin(TouchId(1), sample(5.0, 0.0, Some(4)));

        assert_eq!(tracker.len(), 1);
        assert!(tracker.is_tracking(TouchId(1)));
        let record = tracker.finish(TouchId(1)).unwrap();
        assert_eq!(record.start.target, Some(NodeId(4)));
        assert!(tracker.finish(TouchId(1)).is_none());
        assert!(tracker.is_empty());
    }

    #[test]
    fn clear_forgets_every_touch() {
        let mut tracker = TouchTracker::new();
        tracker.begin(TouchId(1), sample(0.0, 0.0, Some(3)));
        tracker.begin(TouchId(2), sample(9.0, 0.0, None));

        tracker.clear();

        assert!(!tracker.is_tracking(TouchId(1)));
        assert!(!tracker.is_tracking(TouchId(2)));
        assert!(tracker.finish(TouchId(2)).is_none());
    }

    #[test]
    fn vertical_swipes_scroll_only_when_allowed() {
        let start = sample(10.0, 10.0, Some(1));
        let end = sample(12.0, 90.0, Some(2));

        assert_eq!(Gesture::classify(&start, &end, true), Gesture::Scroll);
        assert_eq!(
            Gesture::classify(&start, &end, false),
            Gesture::Select {
                start: NodeId(1),
                end: NodeId(2)
            }
        );

        let sideways = sample(90.0, 12.0, Some(2));
        assert!(matches!(
            Gesture::classify(&start, &sideways, true),
            Gesture::Select { .. }
        ));
        assert_eq!(
            Gesture::classify(&start, &sample(90.0, 12.0, None), true),
            Gesture::Unresolved
        );
    }
}
