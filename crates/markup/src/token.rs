use crate::attributes::{Attributes, parse_attributes};

/// One segment of a tokenized document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text between two tags. Empty when tags are adjacent.
    Content(String),
    Tag(Tag),
}

/// A parsed `<...>` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Upper-cased tag name.
    pub name: String,
    /// Attributes keyed by upper-cased name. Always empty for closing tags.
    pub attributes: Attributes,
    pub is_closing: bool,
}

impl Tag {
    pub fn open(name: impl Into<String>, attributes: Attributes) -> Self {
        Self { name: name.into(), attributes, is_closing: false }
    }

    pub fn close(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Attributes::new(), is_closing: true }
    }

    /// Classifies the interior of a `<...>` pair.
    ///
    /// `/NAME` is a closing tag; anything else is an opening tag whose first
    /// space-delimited word is the name and whose remainder is the attribute list.
    pub fn parse(interior: &str) -> Self {
        if let Some(name) = interior.strip_prefix('/') {
            return Self::close(name.to_uppercase());
        }
        match interior.split_once(' ') {
            Some((name, rest)) => Self::open(name.to_uppercase(), parse_attributes(rest)),
            None => Self::open(interior.to_uppercase(), Attributes::new()),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_tag_keeps_remainder_as_name() {
        let tag = Tag::parse("/cell");
        assert!(tag.is_closing);
        assert_eq!(tag.name, "CELL");
        assert!(tag.attributes.is_empty());
    }

    #[test]
    fn opening_tag_with_attributes() {
        let tag = Tag::parse("cell w=20 align=center");
        assert!(!tag.is_closing);
        assert_eq!(tag.name, "CELL");
        assert_eq!(tag.attribute("W"), Some("20"));
        assert_eq!(tag.attribute("ALIGN"), Some("center"));
    }

    #[test]
    fn bare_opening_tag() {
        let tag = Tag::parse("b");
        assert_eq!(tag, Tag::open("B", Attributes::new()));
    }

    #[test]
    fn empty_interior_is_an_unnamed_tag() {
        let tag = Tag::parse("");
        assert_eq!(tag.name, "");
        assert!(!tag.is_closing);
    }
}
