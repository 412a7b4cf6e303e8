use crate::token::{Tag, Token};
use regex::{CaptureMatches, Regex};
use std::sync::LazyLock;

// Non-greedy, and `.` does not cross line breaks, so a tag never spans lines.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(.*?)>").expect("BUG: invalid TAG_RE regex literal"));

/// Lazily splits a document into alternating content and tag tokens.
///
/// The stream always starts and ends with a `Content` token, and content and
/// tag tokens strictly alternate. Adjacent tags therefore yield empty content
/// tokens between them.
pub struct Tokens<'t> {
    text: &'t str,
    matches: CaptureMatches<'static, 't>,
    cursor: usize,
    pending_tag: Option<Tag>,
    finished: bool,
}

impl<'t> Tokens<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            matches: TAG_RE.captures_iter(text),
            cursor: 0,
            pending_tag: None,
            finished: false,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(tag) = self.pending_tag.take() {
            return Some(Token::Tag(tag));
        }
        if self.finished {
            return None;
        }

        let Some(caps) = self.matches.next() else {
            self.finished = true;
            return Some(Token::Content(self.text[self.cursor..].to_string()));
        };
        let (start, end) = caps.get(0).map_or((self.cursor, self.cursor), |m| (m.start(), m.end()));
        let content = self.text[self.cursor..start].to_string();
        self.cursor = end;
        self.pending_tag = Some(Tag::parse(caps.get(1).map_or("", |m| m.as_str())));
        Some(Token::Content(content))
    }
}

/// Tokenizes a whole document eagerly.
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokens::new(text).collect()
}
