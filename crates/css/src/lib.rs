pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use syntax::{
    Declaration, declared_value, parse_declarations, serialize_declarations, set_declaration,
};
pub use values::parse_color;
