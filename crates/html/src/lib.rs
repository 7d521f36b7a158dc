//! Arena document model used by the highlighter.
//!
//! - [`Document`]: mutable node arena addressed by [`NodeId`] handles
//! - [`parse_document`] / [`parse_into`]: small markup parser for fixtures and demo input
//! - [`outer_html`] / [`inner_html`]: markup serialization
//! - [`TreeWalker`]: bounded pre-order traversal

pub mod dom;
pub mod serialize;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::dom::{Ancestors, Document, DomError};
pub use crate::dom_builder::{parse_document, parse_into};
pub use crate::serialize::{inner_html, inner_html_unwrapping, outer_html};
pub use crate::tokenizer::tokenize;
pub use crate::traverse::{TreeWalker, is_ignorable_element};
pub use crate::types::{ElementData, NodeId, NodeKind, Token};
