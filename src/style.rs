//! Text style state driven by `<B>`, `<I>`, `<U>` and `<SMALL>` tags.

/// A counter-based style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Bold,
    Italic,
    Underline,
}

impl StyleTag {
    /// Canonical order of the letters in a variant string.
    pub const ALL: [StyleTag; 3] = [StyleTag::Bold, StyleTag::Italic, StyleTag::Underline];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "B" => Some(StyleTag::Bold),
            "I" => Some(StyleTag::Italic),
            "U" => Some(StyleTag::Underline),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            StyleTag::Bold => 'B',
            StyleTag::Italic => 'I',
            StyleTag::Underline => 'U',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// How many times each style tag is currently open.
///
/// A style is active while its count is above zero. Closing a tag that is not
/// open leaves the count at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleState {
    counts: [u32; 3],
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `name`. Returns the new variant string if `name` is a style tag.
    pub fn open(&mut self, name: &str) -> Option<String> {
        let tag = StyleTag::from_name(name)?;
        self.counts[tag.index()] += 1;
        Some(self.variant())
    }

    /// Closes `name`. Returns the new variant string if `name` is a style tag.
    pub fn close(&mut self, name: &str) -> Option<String> {
        let tag = StyleTag::from_name(name)?;
        let count = &mut self.counts[tag.index()];
        *count = count.saturating_sub(1);
        Some(self.variant())
    }

    pub fn count(&self, tag: StyleTag) -> u32 {
        self.counts[tag.index()]
    }

    pub fn is_active(&self, tag: StyleTag) -> bool {
        self.count(tag) > 0
    }

    /// Letters of all active styles in `B`, `I`, `U` order, e.g. `"BU"`.
    pub fn variant(&self) -> String {
        StyleTag::ALL
            .iter()
            .filter(|tag| self.is_active(**tag))
            .map(|tag| tag.letter())
            .collect()
    }

    /// True when no style tag is open.
    pub fn is_reset(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }
}

/// Font size toggled by `<SMALL>`.
///
/// This does not nest: any `</SMALL>` restores the default size, however
/// many `<SMALL>` tags are open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizeState {
    default_size: f32,
    small_size: f32,
    current: f32,
}

impl FontSizeState {
    pub fn new(default_size: f32, small_size: f32) -> Self {
        Self { default_size, small_size, current: default_size }
    }

    pub fn open_small(&mut self) -> f32 {
        self.current = self.small_size;
        self.current
    }

    pub fn close_small(&mut self) -> f32 {
        self.current = self.default_size;
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_counts() {
        let mut style = StyleState::new();
        assert_eq!(style.open("B").as_deref(), Some("B"));
        assert_eq!(style.open("B").as_deref(), Some("B"));
        assert_eq!(style.count(StyleTag::Bold), 2);
        assert_eq!(style.close("B").as_deref(), Some("B"));
        assert_eq!(style.close("B").as_deref(), Some(""));
        assert!(style.is_reset());
    }

    #[test]
    fn test_variant_order_is_canonical() {
        let mut style = StyleState::new();
        style.open("U");
        style.open("I");
        style.open("B");
        assert_eq!(style.variant(), "BIU");
        style.close("I");
        assert_eq!(style.variant(), "BU");
    }

    #[test]
    fn test_unbalanced_close_clamps_at_zero() {
        let mut style = StyleState::new();
        assert_eq!(style.close("B").as_deref(), Some(""));
        assert_eq!(style.count(StyleTag::Bold), 0);
        style.open("B");
        assert_eq!(style.variant(), "B");
    }

    #[test]
    fn test_unknown_tags_are_no_ops() {
        let mut style = StyleState::new();
        assert_eq!(style.open("STRONG"), None);
        assert_eq!(style.close("EM"), None);
        assert!(style.is_reset());
    }

    #[test]
    fn test_small_does_not_nest() {
        let mut size = FontSizeState::new(9.0, 6.0);
        assert_eq!(size.current(), 9.0);
        assert_eq!(size.open_small(), 6.0);
        assert_eq!(size.open_small(), 6.0);
        assert_eq!(size.close_small(), 9.0);
        assert_eq!(size.current(), 9.0);
        assert_eq!(size.close_small(), 9.0);
    }
}
