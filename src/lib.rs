//! Ttychat is a full-screen terminal chat client for a local Ollama-style
//! model server.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the bounded transcript, the session
//!   object (scroll offset, input line, terminal geometry), configuration,
//!   and shared constants.
//! - [`ui`] drives the terminal: raw-mode setup and restoration, raw input
//!   decoding, the cursor-addressed screen renderer, and the interactive
//!   event loop.
//! - [`commands`] implements slash-command classification used by the chat
//!   loop.
//! - [`api`] holds the blocking completion client and the JSON payload
//!   helpers it relies on.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`), which
//! resolves configuration and dispatches into [`ui::chat_loop`] for the
//! interactive session.

pub mod api;
pub mod commands;
pub mod core;
pub mod logging;
pub mod ui;
