//! Build job data models.
//!
//! Defines the per-click build request, the listener hooks fired around the
//! CMake invocation, and the outcome reported back to the window.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the disposable output directory inside the project.
pub const BUILD_DIR_NAME: &str = "build";

/// One CMake configure run for a project against a Houdini install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    /// HDK project root (contains CMakeLists.txt)
    project: PathBuf,

    /// Houdini install root, exported to CMake
    host_root: PathBuf,
}

impl BuildJob {
    /// Create a job; `None` unless both paths are non-empty.
    pub fn new(project: impl Into<PathBuf>, host_root: impl Into<PathBuf>) -> Option<Self> {
        let project = project.into();
        let host_root = host_root.into();

        if project.as_os_str().is_empty() || host_root.as_os_str().is_empty() {
            return None;
        }

        Some(Self { project, host_root })
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn host_root(&self) -> &Path {
        &self.host_root
    }

    /// `<project>/build`, used as the working directory for CMake.
    pub fn build_dir(&self) -> PathBuf {
        self.project.join(BUILD_DIR_NAME)
    }
}

/// Hooks fired around the external build command.
pub trait BuildListener {
    /// Called once the build directory is ready, before the settle delay.
    fn before_build(&mut self);

    /// Called exactly once after the command returned or failed to start.
    fn after_build(&mut self);
}

/// How a CMake run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Process exit code; `None` when terminated by a signal
    pub exit_code: Option<i32>,
}

impl BuildOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl std::fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exit_code {
            Some(0) => write!(f, "CMake finished successfully"),
            Some(code) => write!(f, "CMake exited with code {code}"),
            None => write!(f, "CMake was terminated"),
        }
    }
}

/// Build runner error types.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No project configured")]
    NotConfigured,

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
