//! Window geometry persistence.
//!
//! Saves and restores the console window rectangle across runs. The record
//! is one line of four comma-separated integers, `left, top, width,
//! height`, stored as `settings.txt` in a per-application local data
//! directory keyed by the executable's base name. Every failure on the
//! save/restore paths is caught here, logged as a single warning line, and
//! treated as "feature skipped" — it never disturbs the hosting process.

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConsoleError;
use crate::geometry::{parse_four_integers, WindowRect};
use crate::native::ConsoleBackend;

const SETTINGS_FILE_NAME: &str = "settings.txt";

/// Base name of the running executable, extension stripped.
///
/// Keys the settings directory, so every application hosting this layer
/// gets its own rectangle.
fn app_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Full path of the settings file. Does not create anything.
pub fn settings_file_path() -> Result<PathBuf, ConsoleError> {
    let app_name = app_name();
    let proj_dirs = ProjectDirs::from("", "", &app_name).ok_or_else(|| ConsoleError::IoUnavailable {
        detail: "failed to determine the local data directory".to_string(),
    })?;
    Ok(proj_dirs.data_local_dir().join(SETTINGS_FILE_NAME))
}

/// Serialize a rectangle to the settings-record form.
pub fn format_record(rect: &WindowRect) -> String {
    format!("{}, {}, {}, {}", rect.left(), rect.top(), rect.width(), rect.height())
}

/// Parse the settings-record form back into a rectangle.
pub fn parse_record(text: &str) -> Result<WindowRect, ConsoleError> {
    let [left, top, width, height] = parse_four_integers(text)?;
    Ok(WindowRect::from_position_and_size(left, top, width, height))
}

/// Current rectangle of the console window.
pub fn current_rect(backend: &dyn ConsoleBackend) -> Result<WindowRect, ConsoleError> {
    let handle = backend.window_handle()?;
    backend.window_rect(handle)
}

/// Clamp a rectangle to the visible desktop and apply it to the console
/// window.
pub fn apply_rect(backend: &dyn ConsoleBackend, rect: &WindowRect) -> Result<(), ConsoleError> {
    let handle = backend.window_handle()?;
    let target = match backend.desktop_rect() {
        Ok(desktop) => rect.clamped_to(&desktop),
        Err(error) => {
            eprintln!("[RESTORE] Warning: failed to get the desktop window, applying unclamped: {}", error);
            *rect
        }
    };
    backend.set_window_rect(handle, &target)
}

/// Restore the window rectangle persisted by the previous run, if any.
///
/// Never fails: a missing file is a silent skip, and every other failure
/// is logged and swallowed so startup continues with default placement.
pub fn restore_window_rect(backend: &dyn ConsoleBackend) {
    match settings_file_path() {
        Ok(path) => restore_from(backend, &path),
        Err(error) => eprintln!("[RESTORE] Warning: failed to locate the settings file: {}", error),
    }
}

pub(crate) fn restore_from(backend: &dyn ConsoleBackend, path: &Path) {
    if !path.exists() {
        return;
    }
    // The file can exist but be corrupt; that must not keep the
    // application from starting.
    let rect = match read_record(path) {
        Ok(rect) => rect,
        Err(error) => {
            eprintln!("[RESTORE] Warning: failed to read the settings file: {}", error);
            return;
        }
    };
    if let Err(error) = apply_rect(backend, &rect) {
        eprintln!("[RESTORE] Warning: failed to realize the window rectangle: {}", error);
    }
}

fn read_record(path: &Path) -> Result<WindowRect, ConsoleError> {
    let text = fs::read_to_string(path).map_err(|error| ConsoleError::IoUnavailable {
        detail: format!("failed to read {}: {}", path.display(), error),
    })?;
    parse_record(&text)
}

/// Persist the current window rectangle for the next run.
///
/// Never fails: every failure is logged and swallowed, and the process
/// exit code is unaffected.
pub fn save_window_rect(backend: &dyn ConsoleBackend) {
    let rect = match current_rect(backend) {
        Ok(rect) => rect,
        Err(error) => {
            eprintln!("[SAVE] Warning: failed to obtain the console window rectangle: {}", error);
            return;
        }
    };
    match settings_file_path() {
        Ok(path) => save_to(&rect, &path),
        Err(error) => eprintln!("[SAVE] Warning: failed to locate the settings file: {}", error),
    }
}

pub(crate) fn save_to(rect: &WindowRect, path: &Path) {
    if let Err(error) = write_record(rect, path) {
        eprintln!("[SAVE] Warning: failed to save the console window rectangle: {}", error);
    }
}

fn write_record(rect: &WindowRect, path: &Path) -> Result<(), ConsoleError> {
    if let Some(directory) = path.parent() {
        if !directory.exists() {
            fs::create_dir_all(directory).map_err(|error| ConsoleError::IoUnavailable {
                detail: format!("failed to create {}: {}", directory.display(), error),
            })?;
        }
    }
    fs::write(path, format_record(rect)).map_err(|error| ConsoleError::IoUnavailable {
        detail: format!("failed to write {}: {}", path.display(), error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::fake::FakeConsole;

    fn temp_path(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("conwrap-store-{}-{}", std::process::id(), test_name))
    }

    #[test]
    fn test_record_round_trip() {
        for rect in [
            WindowRect::from_position_and_size(0, 0, 100, 100),
            WindowRect::from_position_and_size(-100, 50, 800, 600),
            WindowRect::from_position_and_size(1920, 0, 1024, 768),
        ] {
            let text = format_record(&rect);
            assert_eq!(parse_record(&text).unwrap(), rect);
        }
    }

    #[test]
    fn test_record_uses_position_and_size_order() {
        let rect = WindowRect::from_position_and_size(10, 20, 800, 600);
        assert_eq!(format_record(&rect), "10, 20, 800, 600");
    }

    #[test]
    fn test_parse_record_rejects_garbage() {
        assert!(parse_record("10, 20, 30").unwrap_err().is_malformed_record());
        let error = parse_record("a, b, c, d").unwrap_err();
        assert!(format!("{}", error).contains("'a'"));
    }

    #[test]
    fn test_settings_file_path_ends_with_settings_txt() {
        // No home directory means no path at all; acceptable in bare
        // environments.
        let Ok(path) = settings_file_path() else {
            eprintln!("Note: no local data directory in this environment");
            return;
        };
        assert!(path.to_string_lossy().ends_with(SETTINGS_FILE_NAME));
        // Keyed by the executable base name, so the test binary's own stem
        // must appear somewhere in the path.
        let stem = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()));
        if let Some(stem) = stem {
            // Some platforms case-fold the project directory name.
            assert!(
                path.to_string_lossy().to_lowercase().contains(&stem.to_lowercase()),
                "path {} should contain {}",
                path.display(),
                stem
            );
        }
    }

    #[test]
    fn test_restore_applies_the_saved_rectangle() {
        let directory = temp_path("restore-applies");
        fs::create_dir_all(&directory).unwrap();
        let path = directory.join(SETTINGS_FILE_NAME);
        fs::write(&path, "10, 20, 800, 600").unwrap();

        let backend = FakeConsole::fresh();
        restore_from(&backend, &path);

        let applied = backend.applied.borrow();
        assert_eq!(applied.as_slice(), &[WindowRect::from_position_and_size(10, 20, 800, 600)]);

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_restore_clamps_an_offscreen_rectangle() {
        let directory = temp_path("restore-clamps");
        fs::create_dir_all(&directory).unwrap();
        let path = directory.join(SETTINGS_FILE_NAME);
        fs::write(&path, "-500, -500, 40, 40").unwrap();

        let backend = FakeConsole::fresh();
        restore_from(&backend, &path);

        let applied = backend.applied.borrow();
        assert_eq!(applied.len(), 1);
        let desktop = backend.desktop.unwrap();
        let rect = applied[0];
        assert!(rect.width() >= 100 && rect.height() >= 100);
        assert!(rect.x1 >= desktop.x1 && rect.x2 <= desktop.x2);
        assert!(rect.y1 >= desktop.y1 && rect.y2 <= desktop.y2);

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_restore_skips_silently_when_no_file_exists() {
        let backend = FakeConsole::fresh();
        restore_from(&backend, &temp_path("restore-missing").join(SETTINGS_FILE_NAME));
        assert!(backend.applied.borrow().is_empty());
    }

    #[test]
    fn test_restore_skips_a_corrupt_file() {
        let directory = temp_path("restore-corrupt");
        fs::create_dir_all(&directory).unwrap();
        let path = directory.join(SETTINGS_FILE_NAME);
        fs::write(&path, "left, top, width, height").unwrap();

        let backend = FakeConsole::fresh();
        restore_from(&backend, &path);
        assert!(backend.applied.borrow().is_empty());

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_restore_skips_when_no_window_is_attached() {
        let directory = temp_path("restore-no-window");
        fs::create_dir_all(&directory).unwrap();
        let path = directory.join(SETTINGS_FILE_NAME);
        fs::write(&path, "10, 20, 800, 600").unwrap();

        let backend = FakeConsole::redirected();
        restore_from(&backend, &path);
        assert!(backend.applied.borrow().is_empty());

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_save_creates_the_directory_and_writes_the_record() {
        let directory = temp_path("save-creates");
        let path = directory.join("nested").join(SETTINGS_FILE_NAME);

        let rect = WindowRect::from_corners(100, 100, 900, 700);
        save_to(&rect, &path);

        assert_eq!(fs::read_to_string(&path).unwrap(), "100, 100, 800, 600");

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_save_overwrites_a_previous_record() {
        let directory = temp_path("save-overwrites");
        fs::create_dir_all(&directory).unwrap();
        let path = directory.join(SETTINGS_FILE_NAME);
        fs::write(&path, "1, 2, 3, 4").unwrap();

        save_to(&WindowRect::from_position_and_size(5, 6, 700, 800), &path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "5, 6, 700, 800");

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let directory = temp_path("save-failure");
        fs::create_dir_all(&directory).unwrap();
        // A file where the settings directory should be makes the
        // directory uncreatable.
        let blocker = directory.join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join(SETTINGS_FILE_NAME);

        // Must log a warning and return, not panic or propagate.
        save_to(&WindowRect::from_position_and_size(0, 0, 100, 100), &path);

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_save_skips_when_no_window_is_attached() {
        // No window handle: the save path logs a warning and leaves the
        // settings file alone.
        let backend = FakeConsole::redirected();
        save_window_rect(&backend);
    }
}
