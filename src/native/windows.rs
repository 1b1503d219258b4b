//! Win32 backend for the console window.
//!
//! Thin translation of the native calls: `GetConsoleWindow` for the handle,
//! `GetWindowRect`/`MoveWindow` for geometry, `GetConsoleScreenBufferInfo`
//! for the cursor, `WM_SETICON` for the icon. Every failed call is reported
//! with the code from `GetLastError`.

use std::ffi::OsStr;
use std::iter::once;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows_sys::Win32::Foundation::{GetLastError, INVALID_HANDLE_VALUE, RECT};
use windows_sys::Win32::System::Console::{
    GetConsoleScreenBufferInfo, GetConsoleTitleW, GetConsoleWindow, GetStdHandle, SetConsoleOutputCP,
    CONSOLE_SCREEN_BUFFER_INFO, COORD, SMALL_RECT, STD_OUTPUT_HANDLE,
};
use windows_sys::Win32::System::Environment::GetCommandLineW;
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Shell::ExtractIconW;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetDesktopWindow, GetWindowRect, MoveWindow, SendMessageW, ShowWindow, ICON_BIG, ICON_SMALL, SW_HIDE, SW_SHOW,
    WM_SETICON,
};

use super::{ConsoleBackend, WindowHandle};
use crate::error::ConsoleError;
use crate::geometry::WindowRect;

const CP_UTF8: u32 = 65001;

pub struct WindowsConsole;

fn last_error(function: &'static str) -> ConsoleError {
    ConsoleError::NativeCall {
        function,
        code: unsafe { GetLastError() },
    }
}

fn wide_path(path: &Path) -> Vec<u16> {
    OsStr::new(path).encode_wide().chain(once(0)).collect()
}

fn query_window_rect(handle: WindowHandle) -> Result<WindowRect, ConsoleError> {
    let mut rect = RECT {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };
    let ok = unsafe { GetWindowRect(handle, &mut rect) };
    if ok == 0 {
        return Err(last_error("GetWindowRect"));
    }
    Ok(WindowRect::from_corners(rect.left, rect.top, rect.right, rect.bottom))
}

impl ConsoleBackend for WindowsConsole {
    fn window_handle(&self) -> Result<WindowHandle, ConsoleError> {
        let handle = unsafe { GetConsoleWindow() };
        if handle == 0 {
            return Err(ConsoleError::HandleUnavailable);
        }
        Ok(handle)
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect, ConsoleError> {
        query_window_rect(handle)
    }

    fn set_window_rect(&self, handle: WindowHandle, rect: &WindowRect) -> Result<(), ConsoleError> {
        // MoveWindow sizes the window using the scale factor of the monitor
        // it is on at the moment of the call, not the monitor the target
        // coordinates land on. The first call puts the window on the target
        // monitor (the size may come out wrong there); the second call,
        // with identical coordinates, realizes the size under that
        // monitor's scaling.
        for _ in 0..2 {
            let ok = unsafe { MoveWindow(handle, rect.left(), rect.top(), rect.width(), rect.height(), 1) };
            if ok == 0 {
                return Err(last_error("MoveWindow"));
            }
        }
        Ok(())
    }

    fn desktop_rect(&self) -> Result<WindowRect, ConsoleError> {
        let handle = unsafe { GetDesktopWindow() };
        if handle == 0 {
            return Err(ConsoleError::HandleUnavailable);
        }
        query_window_rect(handle)
    }

    fn set_icon(&self, handle: WindowHandle, executable: &Path) -> Result<(), ConsoleError> {
        let path = wide_path(executable);
        let module = unsafe { GetModuleHandleW(std::ptr::null()) };
        let icon = unsafe { ExtractIconW(module, path.as_ptr(), 0) };
        // NULL means no icon; 1 means the file is not an executable image.
        if icon == 0 || icon == 1 {
            return Err(last_error("ExtractIconW"));
        }
        unsafe {
            SendMessageW(handle, WM_SETICON, ICON_BIG as usize, icon);
            SendMessageW(handle, WM_SETICON, ICON_SMALL as usize, icon);
        }
        Ok(())
    }

    fn set_visibility(&self, handle: WindowHandle, visible: bool) -> Result<(), ConsoleError> {
        unsafe {
            ShowWindow(handle, if visible { SW_SHOW } else { SW_HIDE });
        }
        Ok(())
    }

    fn window_title(&self) -> Option<String> {
        // Titles include the full command line when launched from a shell,
        // so the buffer is sized generously.
        let mut buffer = [0u16; 4096];
        let length = unsafe { GetConsoleTitleW(buffer.as_mut_ptr(), buffer.len() as u32) };
        if length == 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&buffer[..length as usize]))
    }

    fn raw_command_line(&self) -> Option<String> {
        let pointer = unsafe { GetCommandLineW() };
        if pointer.is_null() {
            return None;
        }
        let mut length = 0usize;
        unsafe {
            while *pointer.add(length) != 0 {
                length += 1;
            }
            Some(String::from_utf16_lossy(std::slice::from_raw_parts(pointer, length)))
        }
    }

    fn cursor_position(&self) -> Result<(i16, i16), ConsoleError> {
        let handle = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) };
        if handle == INVALID_HANDLE_VALUE || handle == 0 {
            return Err(ConsoleError::IoUnavailable {
                detail: "no standard output handle".to_string(),
            });
        }
        let mut info = CONSOLE_SCREEN_BUFFER_INFO {
            dwSize: COORD { X: 0, Y: 0 },
            dwCursorPosition: COORD { X: 0, Y: 0 },
            wAttributes: 0,
            srWindow: SMALL_RECT {
                Left: 0,
                Top: 0,
                Right: 0,
                Bottom: 0,
            },
            dwMaximumWindowSize: COORD { X: 0, Y: 0 },
        };
        let ok = unsafe { GetConsoleScreenBufferInfo(handle, &mut info) };
        if ok == 0 {
            // Redirected output: the handle is a file or pipe, not a screen
            // buffer.
            return Err(ConsoleError::IoUnavailable {
                detail: format!("GetConsoleScreenBufferInfo failed with system error code {}", unsafe {
                    GetLastError()
                }),
            });
        }
        Ok((info.dwCursorPosition.X, info.dwCursorPosition.Y))
    }

    fn set_output_utf8(&self) -> Result<(), ConsoleError> {
        let ok = unsafe { SetConsoleOutputCP(CP_UTF8) };
        if ok == 0 {
            return Err(last_error("SetConsoleOutputCP"));
        }
        Ok(())
    }
}
