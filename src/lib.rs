//! Compatibility layer for console-mode applications.
//!
//! Lets a console application behave sensibly whether it was started from
//! an existing command shell or double-clicked from a graphical shell:
//! - detects the launch context from the console title and cursor
//! - restores and saves the console window rectangle across runs
//! - applies one-time cosmetics (window icon, UTF-8 output) on a
//!   graphical launch
//! - converts any uncaught failure into a single-line message and a
//!   process exit code, pausing before the window closes so the output
//!   can be read

pub mod error;
pub mod geometry;
pub mod launch;
pub mod native;
pub mod runner;
pub mod store;

pub use error::ConsoleError;
pub use geometry::WindowRect;
pub use launch::is_launched_from_gui;
pub use native::{platform_backend, ConsoleBackend};
pub use runner::{run, PauseMode, RunConfig};
