use std::str::Lines;

/// Plain text extracted from a document, viewed as an ordered sequence of
/// lines. Immutable once constructed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// Full text, pages concatenated in page order.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines in document order.
    pub fn lines(&self) -> Lines<'_> {
        self.text.lines()
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
