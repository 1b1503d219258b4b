//! No-op backend for platforms without a queryable console window.
//!
//! Every getter reports the console as unavailable and every setter
//! silently succeeds, so the layer degrades to doing nothing instead of
//! failing the hosting application.

use std::path::Path;

use super::{ConsoleBackend, WindowHandle};
use crate::error::ConsoleError;
use crate::geometry::WindowRect;

pub struct StubConsole;

impl ConsoleBackend for StubConsole {
    fn window_handle(&self) -> Result<WindowHandle, ConsoleError> {
        Err(ConsoleError::HandleUnavailable)
    }

    fn window_rect(&self, _handle: WindowHandle) -> Result<WindowRect, ConsoleError> {
        Err(ConsoleError::HandleUnavailable)
    }

    fn set_window_rect(&self, _handle: WindowHandle, _rect: &WindowRect) -> Result<(), ConsoleError> {
        Err(ConsoleError::HandleUnavailable)
    }

    fn desktop_rect(&self) -> Result<WindowRect, ConsoleError> {
        Err(ConsoleError::HandleUnavailable)
    }

    fn set_icon(&self, _handle: WindowHandle, _executable: &Path) -> Result<(), ConsoleError> {
        Ok(())
    }

    fn set_visibility(&self, _handle: WindowHandle, _visible: bool) -> Result<(), ConsoleError> {
        Ok(())
    }

    fn window_title(&self) -> Option<String> {
        None
    }

    fn raw_command_line(&self) -> Option<String> {
        None
    }

    fn cursor_position(&self) -> Result<(i16, i16), ConsoleError> {
        Err(ConsoleError::IoUnavailable {
            detail: "no console screen buffer on this platform".to_string(),
        })
    }

    fn set_output_utf8(&self) -> Result<(), ConsoleError> {
        Ok(())
    }
}
