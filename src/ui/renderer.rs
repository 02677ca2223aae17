//! Cursor-addressed screen painting.
//!
//! The screen is three fixed regions: a bold status bar on the top row, the
//! chat viewport below it, and the input line on the second-to-last row
//! (the bottom row stays blank). There is no incremental diffing: a full
//! repaint is the only way the screen changes, and every handled input
//! chunk ends with exactly one. Each row is cleared to end of line so a
//! shorter line never leaves stale characters behind.
//!
//! All drawing is queued against a generic writer, which keeps the
//! renderer testable against an in-memory sink.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use crate::core::constants::INPUT_PROMPT;
use crate::core::session::Session;

/// Top row: message counter, bold, cleared to end of line.
pub fn draw_status(out: &mut impl Write, session: &Session) -> io::Result<()> {
    queue!(
        out,
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(format!(
            "Status: ttychat | Messages: {}",
            session.transcript().len()
        )),
        SetAttribute(Attribute::Reset),
        Clear(ClearType::UntilNewLine),
    )
}

/// Chat viewport: clear every row, then write the visible window of the
/// transcript one message per row, clipped to the terminal width.
pub fn draw_chat(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let height = session.viewport_height();
    let width = session.size().cols as usize;
    for row in 0..height {
        queue!(out, MoveTo(0, row as u16 + 1), Clear(ClearType::UntilNewLine))?;
    }
    for (row, message) in session.visible_messages().enumerate() {
        let clipped: String = message.chars().take(width).collect();
        queue!(
            out,
            MoveTo(0, row as u16 + 1),
            Print(clipped),
            Clear(ClearType::UntilNewLine),
        )?;
    }
    Ok(())
}

/// Input line on the second-to-last row: prompt, buffer contents, cursor
/// parked right after the last typed character.
pub fn draw_input(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let row = session.size().rows.saturating_sub(2);
    let prompt_width = INPUT_PROMPT.chars().count();
    let width = (session.size().cols as usize).saturating_sub(prompt_width);
    let visible: String = session.input().as_str().chars().take(width).collect();
    let cursor_col = (prompt_width + visible.chars().count()) as u16;
    queue!(
        out,
        MoveTo(0, row),
        Clear(ClearType::UntilNewLine),
        Print(INPUT_PROMPT),
        Print(visible),
        MoveTo(cursor_col, row),
    )
}

/// One full repaint: status + chat + input, then flush.
pub fn draw_all(out: &mut impl Write, session: &Session) -> io::Result<()> {
    draw_status(out, session)?;
    draw_chat(out, session)?;
    draw_input(out, session)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::TermSize;

    fn render(session: &Session) -> String {
        let mut sink = Vec::new();
        draw_all(&mut sink, session).unwrap();
        String::from_utf8(sink).unwrap()
    }

    fn test_session() -> Session {
        let mut session = Session::new(TermSize { rows: 6, cols: 20 });
        session.push_message("hello");
        session.push_message("world");
        session
    }

    #[test]
    fn status_is_bold_on_the_top_row() {
        let output = render(&test_session());
        assert!(output.contains("\x1b[1;1H"));
        assert!(output.contains("\x1b[1m"));
        assert!(output.contains("Status: ttychat | Messages: 2"));
        assert!(output.contains("\x1b[0m"));
    }

    #[test]
    fn chat_rows_start_on_row_two() {
        let output = render(&test_session());
        let row_two = output.find("\x1b[2;1H").expect("first chat row");
        assert!(output[row_two..].contains("hello"));
        assert!(output.contains("\x1b[3;1H"));
    }

    #[test]
    fn every_region_clears_to_end_of_line() {
        let session = test_session();
        let output = render(&session);
        let clears = output.matches("\x1b[K").count();
        // One per chat row, one per written message, one each for status
        // and input.
        assert!(clears >= session.viewport_height() + 2);
    }

    #[test]
    fn input_row_shows_prompt_and_cursor_after_text() {
        let mut session = test_session();
        for c in "ab".chars() {
            session.input_mut().push(c);
        }
        let output = render(&session);
        // rows = 6: input lives on the fifth row.
        assert!(output.contains("\x1b[5;1H"));
        assert!(output.contains("> ab"));
        // Cursor lands right after 'b': column 5 (1-based).
        assert!(output.ends_with("\x1b[5;5H"));
    }

    #[test]
    fn shows_the_window_at_the_scroll_offset() {
        let mut session = Session::new(TermSize { rows: 6, cols: 40 });
        for i in 0..10 {
            session.push_message(&format!("line {i}"));
        }
        // Pinned to the bottom: the last three lines are visible.
        let output = render(&session);
        assert!(output.contains("line 9"));
        assert!(!output.contains("line 0"));

        session.scroll_up(100);
        let output = render(&session);
        assert!(output.contains("line 0"));
        assert!(!output.contains("line 9"));
    }

    #[test]
    fn long_messages_are_clipped_to_the_width() {
        let mut session = Session::new(TermSize { rows: 6, cols: 10 });
        session.push_message("abcdefghijklmnopqrstuvwxyz");
        let output = render(&session);
        assert!(output.contains("abcdefghij"));
        assert!(!output.contains("abcdefghijk"));
    }

    #[test]
    fn degenerate_geometry_renders_without_panicking() {
        let mut session = Session::new(TermSize { rows: 2, cols: 4 });
        session.push_message("hi");
        let mut sink = Vec::new();
        draw_all(&mut sink, &session).unwrap();
    }
}
