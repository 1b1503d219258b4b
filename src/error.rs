//! Error kinds shared by the console layer.
//!
//! Everything that can go wrong here falls into one of four buckets:
//! - no console window is attached to the process (fully redirected output)
//! - a native call reported failure (carries the OS error code)
//! - the persisted rectangle text does not parse
//! - a lower-level I/O fault (file access, cursor query under redirection)

use std::fmt;

/// Error raised by the native console layer and the geometry store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// No console window handle exists, e.g. because output is redirected
    /// to a file or pipe and no window was ever attached.
    HandleUnavailable,
    /// A native windowing call failed; carries the platform error code.
    NativeCall { function: &'static str, code: u32 },
    /// The persisted rectangle record does not parse as four integers.
    /// The detail names the offending token and the expected format.
    MalformedRecord { detail: String },
    /// A file read/write or console query raised a lower-level I/O fault.
    IoUnavailable { detail: String },
}

impl ConsoleError {
    /// Build a parse failure for a token that is not an integer.
    ///
    /// A bare integer-parse error reports only "invalid digit" with no
    /// context; this variant names the token and the expected format.
    pub fn bad_token(token: &str) -> Self {
        ConsoleError::MalformedRecord {
            detail: format!("failed to parse '{}' as a base-10 integer", token),
        }
    }

    /// Build a parse failure for a record with the wrong number of tokens.
    pub fn wrong_token_count(found: usize) -> Self {
        ConsoleError::MalformedRecord {
            detail: format!("expected four comma-separated integers, found {} token(s)", found),
        }
    }

    /// Check whether this is a persisted-record parse failure.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, ConsoleError::MalformedRecord { .. })
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::HandleUnavailable => {
                write!(f, "no console window is attached to this process")
            }
            ConsoleError::NativeCall { function, code } => {
                write!(f, "{} failed with system error code {}", function, code)
            }
            ConsoleError::MalformedRecord { detail } => write!(f, "{}", detail),
            ConsoleError::IoUnavailable { detail } => write!(f, "{}", detail),
        }
    }
}

impl std::error::Error for ConsoleError {}
