//! Phrase rotation

/// Cycles through a fixed list of phrases, wrapping at the end
#[derive(Debug, Clone, Default)]
pub struct PhraseCursor {
    phrases: Vec<String>,
    index: usize,
}

impl PhraseCursor {
    pub fn new(phrases: Vec<String>) -> Self {
        Self { phrases, index: 0 }
    }

    /// Current phrase, or "" when the list is empty
    pub fn current(&self) -> &str {
        self.phrases.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// Step to the following phrase and return it
    pub fn advance(&mut self) -> &str {
        if !self.phrases.is_empty() {
            self.index = (self.index + 1) % self.phrases.len();
        }
        self.current()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
