//! Top-level run boundary for console applications.
//!
//! Wraps the hosted main function so that:
//! - launch context is detected before anything is printed
//! - on a graphical launch the window rectangle is restored and the
//!   one-time cosmetics (icon, UTF-8 output) are applied
//! - any failure collapses to a single-line message plus exit code
//! - the window pauses before closing when nobody launched us from a shell
//! - the window rectangle is saved on the way out

use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

use crate::launch;
use crate::native::ConsoleBackend;
use crate::store;

/// Exit code reported when the hosted main function fails or panics.
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Whether to block on [Enter] before the console window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseMode {
    /// Pause exactly when launched from a graphical shell (the window
    /// would vanish otherwise).
    Auto,
    Always,
    Never,
}

/// Startup options, threaded explicitly through [`run`].
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Give the console window the executable's associated icon on a
    /// graphical launch.
    pub set_icon: bool,
    pub pause: PauseMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            set_icon: true,
            pause: PauseMode::Auto,
        }
    }
}

/// Run `main_function` inside the compatibility boundary and exit the
/// process with its code. Never returns.
pub fn run<F>(config: RunConfig, backend: &dyn ConsoleBackend, main_function: F) -> !
where
    F: FnOnce() -> Result<i32, String>,
{
    // Detection depends on pristine title/cursor state, so it happens
    // before any output.
    let from_gui = launch::is_launched_from_gui(backend);
    let pause = effective_pause(config.pause, from_gui);

    if from_gui {
        store::restore_window_rect(backend);
        if config.set_icon {
            realize_icon(backend);
        }
        if let Err(error) = backend.set_output_utf8() {
            eprintln!("[RUN] Warning: failed to switch the console output to UTF-8: {}", error);
        }
    }

    let exit_code = guarded_exit_code(main_function);

    if pause {
        print!("Terminating with exit code {}; press [Enter]: ", exit_code);
        let _ = io::stdout().flush();
        let _ = io::stdin().lock().read_line(&mut String::new());
    }

    if from_gui {
        store::save_window_rect(backend);
    }

    std::process::exit(exit_code);
}

pub(crate) fn effective_pause(mode: PauseMode, from_gui: bool) -> bool {
    match mode {
        PauseMode::Auto => from_gui,
        PauseMode::Always => true,
        PauseMode::Never => false,
    }
}

/// Invoke the hosted main function and convert every failure into a
/// single-line message plus [`FAILURE_EXIT_CODE`].
pub(crate) fn guarded_exit_code<F>(main_function: F) -> i32
where
    F: FnOnce() -> Result<i32, String>,
{
    match panic::catch_unwind(AssertUnwindSafe(main_function)) {
        Ok(Ok(code)) => code,
        Ok(Err(message)) => {
            eprintln!("ERROR: {}", message);
            FAILURE_EXIT_CODE
        }
        Err(payload) => {
            eprintln!("ERROR: unhandled panic: {}", panic_message(payload.as_ref()));
            FAILURE_EXIT_CODE
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Show or hide the console window.
///
/// Fire-and-forget: a missing window or a failed native call is logged,
/// never propagated.
pub fn set_console_visibility(backend: &dyn ConsoleBackend, visible: bool) {
    match backend.window_handle() {
        Ok(handle) => {
            if let Err(error) = backend.set_visibility(handle, visible) {
                eprintln!("[RUN] Warning: failed to change the console window visibility: {}", error);
            }
        }
        Err(error) => eprintln!("[RUN] Failed to get the console window: {}", error),
    }
}

fn realize_icon(backend: &dyn ConsoleBackend) {
    let executable = match std::env::current_exe() {
        Ok(path) => path,
        Err(error) => {
            eprintln!("[RUN] Warning: failed to locate the running executable: {}", error);
            return;
        }
    };
    let handle = match backend.window_handle() {
        Ok(handle) => handle,
        Err(error) => {
            eprintln!("[RUN] Warning: failed to get the console window: {}", error);
            return;
        }
    };
    if let Err(error) = backend.set_icon(handle, &executable) {
        eprintln!(
            "[RUN] Warning: failed to set the associated icon of {}: {}",
            executable.display(),
            error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_pause_auto_follows_the_launch_context() {
        assert!(effective_pause(PauseMode::Auto, true));
        assert!(!effective_pause(PauseMode::Auto, false));
    }

    #[test]
    fn test_effective_pause_overrides() {
        assert!(effective_pause(PauseMode::Always, false));
        assert!(!effective_pause(PauseMode::Never, true));
    }

    #[test]
    fn test_successful_main_keeps_its_exit_code() {
        assert_eq!(guarded_exit_code(|| Ok(0)), 0);
        assert_eq!(guarded_exit_code(|| Ok(7)), 7);
    }

    #[test]
    fn test_expected_failure_becomes_the_failure_exit_code() {
        assert_eq!(guarded_exit_code(|| Err("disk on fire".to_string())), FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_panic_becomes_the_failure_exit_code() {
        // Quiet the default hook for the duration of the deliberate panic.
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let code = guarded_exit_code(|| panic!("boom"));
        panic::set_hook(previous);
        assert_eq!(code, FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&"boom".to_string()), "boom");
        assert_eq!(panic_message(&42i32), "non-string panic payload");
    }

    #[test]
    fn test_visibility_is_fire_and_forget_without_a_window() {
        let backend = crate::native::fake::FakeConsole::redirected();
        set_console_visibility(&backend, false);
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(config.set_icon);
        assert_eq!(config.pause, PauseMode::Auto);
    }
}
