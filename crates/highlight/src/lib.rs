//! Text highlighting over the `html` arena.
//!
//! A [`Range`] is turned into marker elements by [`wrap_range`], then
//! [`normalize_highlights`] flattens nested markers and merges adjacent ones
//! of the same style. [`Highlighter`] ties this to a host through
//! [`DocumentAdapter`]: selection-driven highlighting, removal, and touch
//! gestures resolved against word spans.

pub mod adapter;
pub mod config;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod invariants;
pub mod normalize;
pub mod range;
pub mod style;
pub mod touch;
pub mod words;
pub mod wrap;

pub use adapter::{DocumentAdapter, MemoryHost};
pub use config::HighlighterConfig;
pub use controller::{HighlightOutcome, Highlighter};
pub use error::{ConfigError, HighlightError};
pub use hooks::{DefaultHooks, HighlightHooks};
pub use invariants::check_invariants;
pub use normalize::{flatten_nested, merge_siblings, normalize_highlights};
pub use range::{Boundary, Range};
pub use style::{Color, Style};
pub use touch::{Gesture, TouchRecord, TouchSample, TouchTracker};
pub use words::{unwrap_words, wrap_words};
pub use wrap::wrap_range;
