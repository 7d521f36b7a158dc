/// Page coordinates in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Absolute horizontal and vertical displacement from `self` to `other`.
    pub fn displacement(self, other: Point) -> (f32, f32) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }
}

/// Platform touch identifier, stable for the lifetime of one finger contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    End,
}

/// One changed touch point carried by a touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint<T> {
    pub id: TouchId,
    pub position: Point,
    /// Node the platform reports as the touch target.
    pub target: Option<T>,
}

/// Touch event delivered by the host's input source.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent<T> {
    pub phase: TouchPhase,
    pub changed: Vec<TouchPoint<T>>,
}

impl<T> TouchEvent<T> {
    pub fn new(phase: TouchPhase, changed: Vec<TouchPoint<T>>) -> Self {
        Self { phase, changed }
    }
}

/// What the host should do with its default handling of an input event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const PASS_THROUGH: EventOutcome = EventOutcome {
        prevent_default: false,
    };
    pub const PREVENT_DEFAULT: EventOutcome = EventOutcome {
        prevent_default: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_is_absolute() {
        let a = Point::new(10.0, 80.0);
        let b = Point::new(15.0, 30.0);
        assert_eq!(a.displacement(b), (5.0, 50.0));
        assert_eq!(b.displacement(a), (5.0, 50.0));
    }

    #[test]
    fn touch_ids_hash_by_value() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(TouchId(1));
        set.insert(TouchId(1));
        set.insert(TouchId(2));
        assert_eq!(set.len(), 2);
    }
}
