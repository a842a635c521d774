//! CMake build orchestration.
//!
//! A [`BuildRunner`] prepares the build directory, asks its
//! [`BuildListener`] to get the user environment out of the way, runs CMake
//! and then lets the listener put everything back.

pub mod guard;
pub mod job;
pub mod runner;

pub use guard::{EnvironmentGuard, GuardReport, GuardState, GuardedEntry};
pub use job::{BuildError, BuildJob, BuildListener, BuildOutcome};
pub use runner::BuildRunner;
