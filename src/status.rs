use std::fmt;

/// Aggregate of the non-fatal errors and warnings collected during a render pass.
///
/// An empty status means the document rendered cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    messages: Vec<String>,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn merge(&mut self, other: Status) {
        self.messages.extend(other.messages);
    }

    pub fn is_ok(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("\n"))
    }
}

impl Extend<String> for Status {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}
