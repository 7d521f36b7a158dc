//! Markup serialization of arena subtrees.
//!
//! Output rules:
//! - Element and attribute names are written as stored (lowercase from the parser).
//! - Attributes without a value are written bare; values are double-quoted.
//! - Text is escaped, except inside `script`/`style`.
//! - Void elements get no end tag.

use crate::dom::Document;
use crate::entities::{escape_attribute, escape_text};
use crate::types::{NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

type Transparent<'a> = &'a dyn Fn(&Document, NodeId) -> bool;

fn never(_: &Document, _: NodeId) -> bool {
    false
}

/// Serialize `id` and its subtree.
pub fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, false, &never, &mut out);
    out
}

/// Serialize only the children of `id`.
pub fn inner_html(doc: &Document, id: NodeId) -> String {
    inner_html_unwrapping(doc, id, never)
}

/// Like [`inner_html`], but elements accepted by `transparent` are written as
/// their children only, as if they had been unwrapped.
pub fn inner_html_unwrapping(
    doc: &Document,
    id: NodeId,
    transparent: impl Fn(&Document, NodeId) -> bool,
) -> String {
    let mut out = String::new();
    let raw = is_rawtext(doc, id);
    for child in doc.children(id) {
        write_node(doc, *child, raw, &transparent, &mut out);
    }
    out
}

fn is_rawtext(doc: &Document, id: NodeId) -> bool {
    doc.is_element_named(id, "script") || doc.is_element_named(id, "style")
}

fn write_node(
    doc: &Document,
    id: NodeId,
    raw_text: bool,
    transparent: Transparent<'_>,
    out: &mut String,
) {
    match doc.kind(id) {
        Some(NodeKind::Document { doctype }) => {
            if let Some(doctype) = doctype {
                out.push_str("<!");
                out.push_str(doctype);
                out.push('>');
            }
            for child in doc.children(id) {
                write_node(doc, *child, false, transparent, out);
            }
        }
        Some(NodeKind::Element(_)) if transparent(doc, id) => {
            for child in doc.children(id) {
                write_node(doc, *child, raw_text, transparent, out);
            }
        }
        Some(NodeKind::Element(el)) => {
            out.push('<');
            out.push_str(&el.name);
            for (key, value) in &el.attributes {
                out.push(' ');
                out.push_str(key);
                if let Some(value) = value {
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&el.name.as_str()) {
                return;
            }
            let raw = is_rawtext(doc, id);
            for child in doc.children(id) {
                write_node(doc, *child, raw, transparent, out);
            }
            out.push_str("</");
            out.push_str(&el.name);
            out.push('>');
        }
        Some(NodeKind::Text(text)) => {
            if raw_text {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        Some(NodeKind::Comment(text)) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn round_trips_simple_markup() {
        let input = r#"<p class="a b">one <b>two</b> &amp; <!--c--><br>three</p>"#;
        let doc = parse_document(input);
        assert_eq!(inner_html(&doc, doc.root()), input);
    }

    #[test]
    fn rawtext_is_not_escaped() {
        let input = "<style>a > b { color: red }</style>";
        let doc = parse_document(input);
        assert_eq!(inner_html(&doc, doc.root()), input);
    }

    #[test]
    fn transparent_elements_are_unwrapped() {
        let doc = parse_document(
            r#"<p><span class="w">one</span> <b><span class="w">two</span></b></p>"#,
        );
        assert_eq!(
            inner_html_unwrapping(&doc, doc.root(), |doc, id| doc.has_class(id, "w")),
            "<p>one <b>two</b></p>"
        );
    }

    #[test]
    fn attribute_values_are_quoted_and_escaped() {
        let mut doc = Document::new();
        let span = doc.create_element("span");
        doc.element_mut(span)
            .unwrap()
            .set_attribute("title", r#"say "hi" & go"#);
        doc.element_mut(span).unwrap().attributes.push(("hidden".into(), None));
        assert_eq!(
            outer_html(&doc, span),
            r#"<span title="say &quot;hi&quot; &amp; go" hidden></span>"#
        );
    }
}
