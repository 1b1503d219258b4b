//! Launch-context detection.
//!
//! Decides whether the process was started from a pre-existing command
//! shell or freshly spawned by a graphical launcher, using nothing but the
//! console window title and the cursor position. Must run before anything
//! is printed to the console, since both probes depend on pristine state.

use crate::native::ConsoleBackend;

/// Returns true when the process was launched from a graphical shell.
///
/// Never fails: ambiguous or unreadable state resolves to false, so a
/// degraded environment just behaves like a plain shell launch.
pub fn is_launched_from_gui(backend: &dyn ConsoleBackend) -> bool {
    if let Some(title) = backend.window_title() {
        // A console spawned for a GUI launch gets the exact full path of
        // the executable as its window title, with no arguments.
        if let Ok(executable) = std::env::current_exe() {
            if title == executable.to_string_lossy() {
                return true;
            }
        }
        // A pre-existing shell window titles itself "<console name> - "
        // followed by the whole command line exactly as typed. The console
        // name depends on the shortcut that opened the window, so only the
        // suffix is reliable.
        if let Some(command_line) = backend.raw_command_line() {
            if title.ends_with(&format!(" - {}", command_line)) {
                return false;
            }
        }
    }
    // A brand new console has its cursor at (0, 0); a shell has already
    // printed at least a prompt. The query fails whenever output is
    // redirected, in which case nothing graphical is going on.
    match backend.cursor_position() {
        Ok((column, row)) => column == 0 && row == 0,
        Err(_) => false,
    }
}
