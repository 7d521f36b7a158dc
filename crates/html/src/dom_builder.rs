use crate::dom::{Document, DomError};
use crate::tokenizer::tokenize;
use crate::types::{ElementData, NodeId, Token};

/// Parse markup into a fresh document. Top-level nodes become children of the
/// document root.
pub fn parse_document(input: &str) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    // The root always accepts children and every node is freshly created, so
    // building cannot fail.
    if let Err(err) = parse_into(&mut doc, root, input) {
        log::warn!(target: "html.dom", "document build failed: {err}");
    }
    doc
}

/// Parse markup and append the resulting nodes under `parent`.
///
/// Returns the top-level nodes that were appended, in order. Unmatched end tags
/// are ignored; an end tag closes the nearest open element with that name and
/// everything opened after it.
pub fn parse_into(
    doc: &mut Document,
    parent: NodeId,
    input: &str,
) -> Result<Vec<NodeId>, DomError> {
    let mut open_elements: Vec<NodeId> = Vec::new();
    let mut top_level = Vec::new();

    for token in tokenize(input) {
        let current = open_elements.last().copied().unwrap_or(parent);
        let created = match token {
            Token::Doctype(doctype) => {
                doc.set_doctype(doctype);
                None
            }
            Token::Comment(text) => Some(doc.create_comment(text)),
            Token::Text(text) => Some(doc.create_text(text)),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let id = doc.create_element_with(ElementData { name, attributes });
                doc.append_child(current, id)?;
                if open_elements.is_empty() {
                    top_level.push(id);
                }
                if !self_closing {
                    open_elements.push(id);
                }
                continue;
            }
            Token::EndTag(name) => {
                if let Some(pos) = open_elements
                    .iter()
                    .rposition(|id| doc.is_element_named(*id, &name))
                {
                    open_elements.truncate(pos);
                }
                None
            }
        };
        if let Some(id) = created {
            doc.append_child(current, id)?;
            if open_elements.is_empty() {
                top_level.push(id);
            }
        }
    }

    Ok(top_level)
}
