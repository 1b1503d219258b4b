//! Native console and window primitives behind a capability trait.
//!
//! The detector and the geometry store only talk to [`ConsoleBackend`], so
//! they stay platform-agnostic and unit-testable without a real window:
//! - `windows`: Win32 implementation (the only platform with a console
//!   window to manage)
//! - `stub`: no-op implementation for every other platform

use std::path::Path;

use crate::error::ConsoleError;
use crate::geometry::WindowRect;

pub mod stub;
#[cfg(target_os = "windows")]
pub mod windows;

/// Opaque platform reference to an on-screen window.
pub type WindowHandle = isize;

/// Capability interface over the platform's console/window primitives.
pub trait ConsoleBackend {
    /// Handle of the window attached to this process's console, if any.
    fn window_handle(&self) -> Result<WindowHandle, ConsoleError>;

    /// Current screen rectangle of the given window.
    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect, ConsoleError>;

    /// Move and resize the given window.
    fn set_window_rect(&self, handle: WindowHandle, rect: &WindowRect) -> Result<(), ConsoleError>;

    /// Rectangle of the desktop (root) window.
    fn desktop_rect(&self) -> Result<WindowRect, ConsoleError>;

    /// Give the window the icon associated with the given executable.
    fn set_icon(&self, handle: WindowHandle, executable: &Path) -> Result<(), ConsoleError>;

    /// Show or hide the window.
    fn set_visibility(&self, handle: WindowHandle, visible: bool) -> Result<(), ConsoleError>;

    /// Title of the console window, if one can be queried.
    fn window_title(&self) -> Option<String>;

    /// The process command line exactly as the shell supplied it.
    fn raw_command_line(&self) -> Option<String>;

    /// Current text-cursor position as (column, row).
    ///
    /// Fails when the output is redirected and no screen buffer can be
    /// queried.
    fn cursor_position(&self) -> Result<(i16, i16), ConsoleError>;

    /// Switch the console output encoding to UTF-8.
    fn set_output_utf8(&self) -> Result<(), ConsoleError>;
}

/// Backend for the platform this binary was built for.
#[cfg(target_os = "windows")]
pub fn platform_backend() -> windows::WindowsConsole {
    windows::WindowsConsole
}

/// Backend for the platform this binary was built for.
#[cfg(not(target_os = "windows"))]
pub fn platform_backend() -> stub::StubConsole {
    stub::StubConsole
}
