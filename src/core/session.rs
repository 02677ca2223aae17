use crate::core::constants::{MAX_INPUT_LEN, RESERVED_ROWS, WELCOME_MESSAGES};
use crate::core::transcript::Transcript;

/// Terminal dimensions, snapshotted once per repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub rows: u16,
    pub cols: u16,
}

/// The not-yet-submitted input line. Printable ASCII only; characters
/// beyond the capacity are dropped.
pub struct InputLine {
    text: String,
    capacity: usize,
}

impl InputLine {
    fn new() -> Self {
        Self {
            text: String::new(),
            capacity: MAX_INPUT_LEN,
        }
    }

    pub fn push(&mut self, c: char) {
        if self.text.chars().count() < self.capacity {
            self.text.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    /// Return the buffered line and clear the buffer.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// All mutable interface state: the transcript, the scroll offset, the
/// input line, and the current terminal geometry. Owned by the chat loop
/// and borrowed by the renderer; there are no process-wide globals.
pub struct Session {
    transcript: Transcript,
    input: InputLine,
    size: TermSize,
    /// Index of the first visible message. Bounded by `max_scroll()`;
    /// equal to the bound when the view is pinned to the newest message.
    scroll: usize,
}

impl Session {
    pub fn new(size: TermSize) -> Self {
        Self {
            transcript: Transcript::new(),
            input: InputLine::new(),
            size,
            scroll: 0,
        }
    }

    /// A fresh session with the welcome lines already in the transcript.
    pub fn with_welcome(size: TermSize) -> Self {
        let mut session = Self::new(size);
        for line in WELCOME_MESSAGES {
            session.push_message(line);
        }
        session
    }

    pub fn size(&self) -> TermSize {
        self.size
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLine {
        &mut self.input
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Chat rows available between the status bar and the input line.
    pub fn viewport_height(&self) -> usize {
        self.size.rows.saturating_sub(RESERVED_ROWS) as usize
    }

    /// Largest valid scroll offset; reaching it shows the newest message.
    pub fn max_scroll(&self) -> usize {
        self.transcript.len().saturating_sub(self.viewport_height())
    }

    /// Append a message, keeping the view pinned to the bottom when it was
    /// there (or when the log still fit the viewport) before the append.
    pub fn push_message(&mut self, text: &str) {
        let fit_before = self.transcript.len() <= self.viewport_height();
        let was_at_bottom = self.scroll == self.max_scroll();
        if !self.transcript.push(text) {
            return;
        }
        if fit_before || was_at_bottom {
            self.scroll = self.max_scroll();
        }
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll = (self.scroll + amount).min(self.max_scroll());
    }

    /// Record new terminal geometry and clamp the offset into the new
    /// valid range.
    pub fn resize(&mut self, size: TermSize) {
        self.size = size;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Messages currently inside the viewport, oldest first.
    pub fn visible_messages(&self) -> impl Iterator<Item = &str> {
        self.transcript
            .iter()
            .skip(self.scroll)
            .take(self.viewport_height())
    }
}
