//! Terminal UI layer for the interactive chat session.
//!
//! The UI module owns raw-mode control, raw input decoding, screen
//! rendering, and the event loop that ties them together.

pub mod chat_loop;
pub mod input;
pub mod renderer;
pub mod terminal;
