use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Tag attributes keyed by upper-cased name. Values are kept as written.
pub type Attributes = BTreeMap<String, String>;

// Accepts a=b, a="b" and a='b'.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([^=]*)=["']?([^"']*)["']?$"#).expect("BUG: invalid ATTRIBUTE_RE regex literal")
});

/// Parses a space-separated attribute list.
///
/// Expressions that are not of the form `name=value` are dropped without
/// error. A repeated name keeps its last value.
pub fn parse_attributes(raw: &str) -> Attributes {
    let mut attributes = Attributes::new();
    for expression in raw.split(' ') {
        match ATTRIBUTE_RE.captures(expression) {
            Some(caps) => {
                attributes.insert(caps[1].to_uppercase(), caps[2].to_string());
            }
            None if !expression.is_empty() => {
                log::trace!("Dropping malformed attribute expression '{}'", expression);
            }
            None => {}
        }
    }
    attributes
}
