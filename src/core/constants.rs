//! Shared constants used across the application

use std::time::Duration;

/// Maximum number of messages the transcript retains. Once full, further
/// appends are dropped (the newest message loses).
pub const MAX_MESSAGES: usize = 100;

/// Maximum length of a single message, in characters. Longer text is
/// truncated on append.
pub const MAX_MESSAGE_LEN: usize = 256;

/// Maximum length of the not-yet-submitted input line, in characters.
pub const MAX_INPUT_LEN: usize = 255;

/// Rows reserved outside the chat viewport: status bar, input line, and one
/// spare row at the bottom.
pub const RESERVED_ROWS: u16 = 3;

/// Prompt printed in front of the input line.
pub const INPUT_PROMPT: &str = "> ";

/// How long the event loop blocks waiting for stdin readiness before it
/// re-checks the resize/terminate flags.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Size of a single raw read from stdin. Large enough for any escape
/// sequence the decoder understands.
pub const READ_CHUNK_LEN: usize = 32;

/// Whole-request timeout for a completion call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default base URL of the local model server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model requested from the server.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Fallback geometry when the terminal size query fails.
pub const FALLBACK_ROWS: u16 = 24;
pub const FALLBACK_COLS: u16 = 80;

/// Farewell line appended before a `/quit` or SIGTERM shutdown.
pub const FAREWELL: &str = "Goodbye!";

/// Farewell line appended when the interrupt byte (Ctrl+C) arrives.
pub const FAREWELL_INTERRUPT: &str = "Goodbye! (Ctrl+C)";

/// Reply to a slash command the client does not know.
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type /quit to exit.";

/// Messages seeded into a fresh transcript.
pub const WELCOME_MESSAGES: [&str; 3] = [
    "Welcome to ttychat!",
    "Type messages below and press Enter.",
    "Use arrow keys or mouse wheel to scroll.",
];
