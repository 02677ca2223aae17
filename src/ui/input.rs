//! Classification of raw stdin chunks into logical input events.
//!
//! Raw mode delivers bytes as they arrive; a single read may carry a
//! printable character, a control byte, or a whole escape sequence. Each
//! chunk is classified by its leading byte. Escape sequences are only
//! recognized when they arrive within one chunk; a sequence split across
//! two reads is misclassified.

const INTERRUPT: u8 = 3;
const BACKSPACE: u8 = 127;
const CTRL_H: u8 = 8;
const ESC: u8 = 27;

/// Wheel button codes reported in the mouse escape sequence.
const WHEEL_UP: u8 = 64;
const WHEEL_DOWN: u8 = 65;

/// Lines scrolled per arrow key press and per wheel notch.
const ARROW_SCROLL_STEP: usize = 1;
const WHEEL_SCROLL_STEP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Ctrl+C under raw mode: terminate the session.
    Interrupt,
    /// Remove the last character of the input line.
    Backspace,
    /// Carriage return or newline: submit the input line.
    Submit,
    /// A printable ASCII character for the input line.
    Char(char),
    ScrollUp(usize),
    ScrollDown(usize),
    /// Anything unrecognized, including truncated escape sequences.
    Ignored,
}

/// Classify one raw chunk by its leading byte.
pub fn decode(chunk: &[u8]) -> InputEvent {
    let Some(&first) = chunk.first() else {
        return InputEvent::Ignored;
    };
    match first {
        INTERRUPT => InputEvent::Interrupt,
        BACKSPACE | CTRL_H => InputEvent::Backspace,
        b'\r' | b'\n' => InputEvent::Submit,
        ESC => decode_escape(chunk),
        b if (32..=126).contains(&b) => InputEvent::Char(b as char),
        _ => InputEvent::Ignored,
    }
}

fn decode_escape(chunk: &[u8]) -> InputEvent {
    if chunk.len() < 3 || chunk[1] != b'[' {
        return InputEvent::Ignored;
    }
    match chunk[2] {
        b'A' => InputEvent::ScrollUp(ARROW_SCROLL_STEP),
        b'B' => InputEvent::ScrollDown(ARROW_SCROLL_STEP),
        // Mouse report: ESC [ M <button> <x> <y>; only the wheel buttons
        // are meaningful here.
        b'M' if chunk.len() > 4 => match chunk[3] {
            WHEEL_UP => InputEvent::ScrollUp(WHEEL_SCROLL_STEP),
            WHEEL_DOWN => InputEvent::ScrollDown(WHEEL_SCROLL_STEP),
            _ => InputEvent::Ignored,
        },
        _ => InputEvent::Ignored,
    }
}
