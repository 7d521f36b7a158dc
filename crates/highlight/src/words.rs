//! Per-word wrapping so touch points can be resolved to single words.

use html::{Document, DomError, NodeId, is_ignorable_element};

enum Piece<'a> {
    Space(&'a str),
    Word(&'a str),
}

fn split_words(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_word = None;
    for (i, c) in text.char_indices() {
        let word = !c.is_whitespace();
        match in_word {
            Some(prev) if prev != word => {
                pieces.push(piece(&text[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_word = Some(word);
    }
    if let Some(word) = in_word {
        pieces.push(piece(&text[start..], word));
    }
    pieces
}

fn piece(text: &str, word: bool) -> Piece<'_> {
    if word { Piece::Word(text) } else { Piece::Space(text) }
}

fn collect_texts(doc: &Document, id: NodeId, class: &str, out: &mut Vec<NodeId>) {
    for &child in doc.children(id) {
        if is_ignorable_element(doc, child) || doc.has_class(child, class) {
            continue;
        }
        if doc.is_text(child) {
            out.push(child);
        } else {
            collect_texts(doc, child, class, out);
        }
    }
}

/// Replace every text node under `root` with `span.<class>` elements, one per
/// whitespace-delimited word, keeping the whitespace runs as plain text.
///
/// Ignorable elements and existing word spans are left alone, so wrapping
/// twice is a no-op. Returns the number of spans created.
pub fn wrap_words(doc: &mut Document, root: NodeId, class: &str) -> Result<usize, DomError> {
    let mut texts = Vec::new();
    collect_texts(doc, root, class, &mut texts);

    let mut created = 0;
    for text_node in texts {
        let Some(parent) = doc.parent(text_node) else {
            continue;
        };
        let content = doc.text(text_node).unwrap_or_default().to_string();
        if content.trim().is_empty() {
            continue;
        }
        for piece in split_words(&content) {
            let node = match piece {
                Piece::Space(space) => doc.create_text(space),
                Piece::Word(word) => {
                    let span = doc.create_element("span");
                    if let Some(el) = doc.element_mut(span) {
                        el.add_class(class);
                    }
                    let text = doc.create_text(word);
                    doc.append_child(span, text)?;
                    created += 1;
                    span
                }
            };
            doc.insert_before(parent, node, Some(text_node))?;
        }
        doc.detach(text_node)?;
    }
    log::debug!(target: "highlight.controller", "wrapped {created} words under node {}", root.0);
    Ok(created)
}

/// Undo [`wrap_words`]: unwrap every `span.<class>` under `root` and merge the
/// text nodes left adjacent by it. Returns the number of spans removed.
pub fn unwrap_words(doc: &mut Document, root: NodeId, class: &str) -> Result<usize, DomError> {
    let spans: Vec<NodeId> = doc
        .descendants(root)
        .into_iter()
        .filter(|&id| doc.is_element_named(id, "span") && doc.has_class(id, class))
        .collect();

    let mut parents = Vec::new();
    for &span in &spans {
        let Some(parent) = doc.parent(span) else {
            continue;
        };
        doc.replace_with_children(span)?;
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }
    for parent in parents {
        merge_adjacent_text(doc, parent)?;
    }
    Ok(spans.len())
}

fn merge_adjacent_text(doc: &mut Document, parent: NodeId) -> Result<(), DomError> {
    let children = doc.children(parent).to_vec();
    let mut previous: Option<NodeId> = None;
    for child in children {
        let Some(text) = doc.text(child).map(str::to_string) else {
            previous = None;
            continue;
        };
        match previous.and_then(|p| doc.text(p).map(|t| (p, t.to_string()))) {
            Some((prev, mut joined)) => {
                joined.push_str(&text);
                doc.set_text(prev, joined)?;
                doc.detach(child)?;
            }
            None => previous = Some(child),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::{inner_html, parse_document};

    #[test]
    fn words_become_spans_and_spaces_stay_text() {
        let mut doc = parse_document("<p> one  two<b>three</b></p>");
        let created = wrap_words(&mut doc, Document::ROOT, "touch").unwrap();

        assert_eq!(created, 3);
        assert_eq!(
            inner_html(&doc, doc.root()),
            r#"<p> <span class="touch">one</span>  <span class="touch">two</span><b><span class="touch">three</span></b></p>"#
        );
        assert_eq!(doc.text_content(doc.root()), " one  twothree");
    }

    #[test]
    fn ignorable_content_and_existing_spans_are_skipped() {
        let mut doc = parse_document("<p>a<script>var x = 1;</script><button>go</button></p>");
        wrap_words(&mut doc, Document::ROOT, "touch").unwrap();
        let once = inner_html(&doc, doc.root());
        assert_eq!(wrap_words(&mut doc, Document::ROOT, "touch").unwrap(), 0);

        assert_eq!(
            once,
            r#"<p><span class="touch">a</span><script>var x = 1;</script><button>go</button></p>"#
        );
        assert_eq!(inner_html(&doc, doc.root()), once);
    }

    #[test]
    fn unwrap_restores_plain_text_nodes() {
        let input = "<div><p>one two</p> <i>three&nbsp;four</i></div>";
        let mut doc = parse_document(input);
        let div = doc.first_child(doc.root()).unwrap();
        wrap_words(&mut doc, div, "touch").unwrap();

        assert_eq!(unwrap_words(&mut doc, div, "touch").unwrap(), 4);
        assert_eq!(inner_html(&doc, doc.root()), input);
        let p = doc.first_child(div).unwrap();
        assert_eq!(doc.children(p).len(), 1);
    }
}
