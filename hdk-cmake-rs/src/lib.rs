//! HDK CMake Tools - Library
//!
//! A small desktop helper that configures Houdini HDK plugin projects with
//! CMake.
//!
//! ## Features
//!
//! - Locate the Houdini install root and the per-user environment folder
//! - Move `packages/` and `houdini.env` aside while CMake runs, then restore
//! - Recreate `<project>/build` and run CMake there with `HFS` exported
//! - Run builds off the UI thread and report the exit status

pub mod app;
pub mod build;
pub mod config;
pub mod host;
pub mod platform;
pub mod ui;

pub use app::{AppState, BuildStatus, WindowAction};
pub use build::{BuildError, BuildJob, BuildListener, BuildOutcome, BuildRunner, EnvironmentGuard};
pub use config::{ConfigError, ToolConfig};
pub use ui::MainWindow;
