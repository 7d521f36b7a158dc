/// Stable handle to a node slot in a [`Document`](crate::Document) arena.
///
/// Handles stay valid for the lifetime of the document; detaching a node does
/// not free its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementData {
    pub name: String,
    pub attributes: Vec<(String, Option<String>)>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = Some(value),
            None => self.attributes.push((key.to_string(), Some(value))),
        }
    }

    pub fn remove_attribute(&mut self, key: &str) {
        self.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let joined = match self.attribute("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {class}", existing.trim())
            }
            _ => class.to_string(),
        };
        self.set_attribute("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let rest = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if rest.is_empty() {
            self.remove_attribute("class");
        } else {
            self.set_attribute("class", rest);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document { doctype: Option<String> },
    Element(ElementData),
    Text(String),
    Comment(String),
}

impl NodeKind {
    pub fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Document { .. } | NodeKind::Element(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_round_trips_through_attribute() {
        let mut el = ElementData::new("span");
        el.add_class("highlighted");
        el.add_class("touch");
        el.add_class("touch");
        assert_eq!(el.attribute("class"), Some("highlighted touch"));

        el.remove_class("highlighted");
        assert_eq!(el.attribute("class"), Some("touch"));
        el.remove_class("touch");
        assert_eq!(el.attribute("class"), None);
    }

    #[test]
    fn attribute_lookup_ignores_ascii_case() {
        let mut el = ElementData::new("p");
        el.attributes.push(("STYLE".to_string(), Some("color: red".to_string())));
        assert_eq!(el.attribute("style"), Some("color: red"));
        el.set_attribute("style", "color: blue");
        assert_eq!(el.attributes.len(), 1);
        assert_eq!(el.attribute("Style"), Some("color: blue"));
    }
}
