use crate::core::constants::{MAX_MESSAGE_LEN, MAX_MESSAGES};

/// Append-only, bounded message log. Messages are plain display lines;
/// insertion order is display order.
pub struct Transcript {
    messages: Vec<String>,
    capacity: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::with_capacity(MAX_MESSAGES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, truncating it to the maximum message length.
    /// Returns false when the log is already full; the message is dropped.
    pub fn push(&mut self, text: &str) -> bool {
        if self.messages.len() >= self.capacity {
            return false;
        }
        let line: String = text.chars().take(MAX_MESSAGE_LEN).collect();
        self.messages.push(line);
        true
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.messages.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
