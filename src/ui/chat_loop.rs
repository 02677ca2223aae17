//! The interactive event loop.
//!
//! Single-threaded and synchronous: block on stdin readiness for up to the
//! poll interval, drain the signal flags, classify whatever bytes arrived,
//! mutate the session (possibly through a blocking completion call), and
//! finish with one full repaint. The completion call blocks everything —
//! no typing or scrolling happens while a request is in flight.

use std::error::Error;
use std::io;

use crate::api::CompletionClient;
use crate::commands::{self, CommandResult};
use crate::core::constants::{
    FAREWELL, FAREWELL_INTERRUPT, POLL_INTERVAL, READ_CHUNK_LEN, UNKNOWN_COMMAND,
};
use crate::core::session::Session;
use crate::ui::input::{self, InputEvent};
use crate::ui::renderer;
use crate::ui::terminal::{self, TerminalGuard};

enum LoopControl {
    Continue,
    Quit,
}

/// Run the interactive session until the user quits. The terminal guard is
/// held for the whole loop, so raw mode is rolled back on every way out of
/// here, error paths included.
pub fn run(client: &CompletionClient) -> Result<(), Box<dyn Error>> {
    terminal::install_signal_handlers()?;
    let mut session = Session::with_welcome(terminal::window_size());
    let _guard = TerminalGuard::enter()?;
    event_loop(&mut session, client)
}

fn event_loop(session: &mut Session, client: &CompletionClient) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout();
    renderer::draw_all(&mut out, session)?;
    let mut buf = [0u8; READ_CHUNK_LEN];

    loop {
        if terminal::take_terminate_request() {
            tracing::info!("termination signal observed");
            session.push_message(FAREWELL);
            renderer::draw_all(&mut out, session)?;
            return Ok(());
        }
        if terminal::take_resize_request() {
            let size = terminal::window_size();
            tracing::debug!(rows = size.rows, cols = size.cols, "terminal resized");
            session.resize(size);
            renderer::draw_all(&mut out, session)?;
        }

        if !terminal::wait_for_input(POLL_INTERVAL)? {
            continue;
        }
        let n = terminal::read_chunk(&mut buf)?;
        if n == 0 {
            // Stdin is gone; leave cleanly rather than spin on EOF.
            tracing::info!("stdin closed");
            session.push_message(FAREWELL);
            renderer::draw_all(&mut out, session)?;
            return Ok(());
        }

        match input::decode(&buf[..n]) {
            InputEvent::Interrupt => {
                tracing::info!("interrupt byte received");
                session.push_message(FAREWELL_INTERRUPT);
                renderer::draw_all(&mut out, session)?;
                return Ok(());
            }
            InputEvent::Backspace => session.input_mut().pop(),
            InputEvent::Char(c) => session.input_mut().push(c),
            InputEvent::ScrollUp(step) => session.scroll_up(step),
            InputEvent::ScrollDown(step) => session.scroll_down(step),
            InputEvent::Submit => {
                let line = session.input_mut().take();
                if !line.is_empty() {
                    if let LoopControl::Quit = handle_submission(session, client, &line) {
                        renderer::draw_all(&mut out, session)?;
                        return Ok(());
                    }
                }
            }
            InputEvent::Ignored => {}
        }
        renderer::draw_all(&mut out, session)?;
    }
}

/// Apply one submitted line: a quit command, an unknown command, or a chat
/// message that goes out to the model and comes back as one reply line.
fn handle_submission(
    session: &mut Session,
    client: &CompletionClient,
    line: &str,
) -> LoopControl {
    match commands::process_input(line) {
        CommandResult::Quit => {
            tracing::info!("quit command received");
            session.push_message(FAREWELL);
            LoopControl::Quit
        }
        CommandResult::Unknown => {
            session.push_message(UNKNOWN_COMMAND);
            LoopControl::Continue
        }
        CommandResult::ProcessAsMessage => {
            session.push_message(line);
            let reply = client.complete(line);
            session.push_message(&reply);
            LoopControl::Continue
        }
    }
}
