//! Raw-mode terminal control and the low-level plumbing crossterm does not
//! cover: stdin readiness polling and signal-flag handlers.
//!
//! Signal handlers never touch interface state. They store into atomic
//! flags that the event loop drains once per iteration, so geometry
//! recompute and repaint always happen on the main thread.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, Command};

use crate::core::constants::{FALLBACK_COLS, FALLBACK_ROWS};
use crate::core::session::TermSize;

static RESIZE_REQUESTED: AtomicBool = AtomicBool::new(false);
static TERMINATE_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Enables mouse reporting: button events, button-motion tracking, and SGR
/// extended encoding.
pub struct EnableMouseReporting;

/// Disables the modes enabled by [`EnableMouseReporting`], in reverse order.
pub struct DisableMouseReporting;

impl Command for EnableMouseReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?1000h\x1b[?1002h\x1b[?1006h")
    }
}

impl Command for DisableMouseReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?1006l\x1b[?1002l\x1b[?1000l")
    }
}

/// Raw-mode session guard. Entering switches the terminal into raw mode,
/// hides the cursor, clears the screen, and turns on mouse reporting;
/// restoration undoes all of it and runs on drop, so it covers every exit
/// path: normal quit, interrupt, error propagation, observed SIGTERM.
pub struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(
            io::stdout(),
            Hide,
            Clear(ClearType::All),
            EnableMouseReporting
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { restored: false })
    }

    /// Restore cooked mode and screen state. Idempotent; also invoked by
    /// drop. Failures are swallowed — there is nowhere left to report them.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = execute!(io::stdout(), Show, DisableMouseReporting);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Current terminal dimensions, or the 24x80 fallback when the query fails.
pub fn window_size() -> TermSize {
    match terminal::size() {
        Ok((cols, rows)) => TermSize { rows, cols },
        Err(_) => TermSize {
            rows: FALLBACK_ROWS,
            cols: FALLBACK_COLS,
        },
    }
}

extern "C" fn handle_sigwinch(_: libc::c_int) {
    RESIZE_REQUESTED.store(true, Ordering::SeqCst);
}

extern "C" fn handle_sigterm(_: libc::c_int) {
    TERMINATE_REQUESTED.store(true, Ordering::SeqCst);
}

/// Install the SIGWINCH and SIGTERM flag handlers. Both are
/// async-signal-safe: they only store into an atomic.
pub fn install_signal_handlers() -> io::Result<()> {
    install(libc::SIGWINCH, handle_sigwinch)?;
    install(libc::SIGTERM, handle_sigterm)
}

fn install(signal: libc::c_int, handler: extern "C" fn(libc::c_int)) -> io::Result<()> {
    let handler = handler as *const () as libc::sighandler_t;
    if unsafe { libc::signal(signal, handler) } == libc::SIG_ERR {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// True once per resize notification since the last call.
pub fn take_resize_request() -> bool {
    RESIZE_REQUESTED.swap(false, Ordering::SeqCst)
}

/// True once per termination request since the last call.
pub fn take_terminate_request() -> bool {
    TERMINATE_REQUESTED.swap(false, Ordering::SeqCst)
}

/// Block until stdin has input or the timeout elapses. Signal arrival
/// (EINTR) reads as "no input yet" so the caller re-checks the flags.
pub fn wait_for_input(timeout: Duration) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as libc::c_int;
    let rc = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    if rc < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(rc > 0 && fds.revents & libc::POLLIN != 0)
}

/// One raw read from stdin. Returns the number of bytes read; 0 on EOF or
/// signal interruption.
pub fn read_chunk(buf: &mut [u8]) -> io::Result<usize> {
    let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
    if n < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(0);
        }
        return Err(err);
    }
    Ok(n as usize)
}
