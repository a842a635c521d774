//! Application state and lifecycle management.
//!
//! Holds the form fields and runs builds on a worker thread so the window
//! stays responsive while CMake is busy.

use crate::build::{BuildJob, BuildOutcome, BuildRunner, EnvironmentGuard, GuardReport};
use crate::config::ToolConfig;
use crate::host;
use crate::platform;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

/// Starting folder for the project picker.
const PROJECT_PICKER_START: &str = "D:\\";

/// Actions that can be triggered from the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Pick the HDK project folder
    BrowseProject,
    /// Pick the Houdini install root
    BrowseHostRoot,
    /// Run CMake for the current fields
    Build,
}

/// Where the current or last build stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// No build started yet
    Idle,

    /// Worker thread running CMake for this project
    Running { project: PathBuf },

    /// Last build finished; `Err` holds the launch error message
    Finished(Result<BuildOutcome, String>),
}

/// Main application state.
pub struct AppState {
    /// Tool configuration
    pub config: ToolConfig,

    /// HDK project path field
    pub project_path: String,

    /// Houdini install root field
    pub host_root: String,

    /// Build progress for the status line
    pub status: BuildStatus,

    /// Error state for UI display
    pub error_message: Option<String>,

    /// Completion channel of the running build
    pending: Option<Receiver<Result<BuildOutcome, String>>>,

    /// Worker running the current build; joined before the state is dropped
    worker: Option<JoinHandle<()>>,
}

/// Put back any `*_back` entries left by a build that never got to restore
/// (for example the process was killed mid-build).
pub fn restore_leftover_backups(env_root: Option<&Path>) -> GuardReport {
    let guard = EnvironmentGuard::new(env_root);
    let report = guard.after();
    if !report.is_noop() {
        tracing::info!(?report, "restored environment left over from an earlier build");
    }
    report
}

impl AppState {
    /// Create the state, prefilling the host root from the default install.
    pub fn new(config: ToolConfig) -> Self {
        restore_leftover_backups(host::resolve_env_root(&config.houdini_version).as_deref());

        let host_root = host::resolve_install_root(&config.houdini_version)
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        Self {
            config,
            project_path: String::new(),
            host_root,
            status: BuildStatus::Idle,
            error_message: None,
            pending: None,
            worker: None,
        }
    }

    pub fn is_building(&self) -> bool {
        self.pending.is_some()
    }

    /// Job for the current fields, if both are filled in.
    pub fn job(&self) -> Option<BuildJob> {
        BuildJob::new(self.project_path.trim(), self.host_root.trim())
    }

    /// Handle an action from the window.
    pub fn handle_action(&mut self, action: WindowAction) {
        match action {
            WindowAction::BrowseProject => {
                let start = Path::new(PROJECT_PICKER_START);
                if let Some(folder) = self.browse("Select HDK Project Path", Some(start)) {
                    self.project_path = folder;
                }
            }
            WindowAction::BrowseHostRoot => {
                let start = host::resolve_install_root(&self.config.houdini_version);
                if let Some(folder) = self.browse("Select Houdini Root Path", start.as_deref()) {
                    self.host_root = folder;
                }
            }
            WindowAction::Build => {
                self.start_build();
            }
        }
    }

    fn browse(&mut self, title: &str, start: Option<&Path>) -> Option<String> {
        match platform::pick_folder(title, start) {
            Ok(folder) => folder.map(|p| p.display().to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "folder picker failed");
                self.error_message = Some(err.to_string());
                None
            }
        }
    }

    /// Start a build on a worker thread. Returns false when nothing was
    /// started: a build is already running or a field is empty.
    pub fn start_build(&mut self) -> bool {
        if self.is_building() {
            tracing::debug!("build already running");
            return false;
        }
        let Some(job) = self.job() else {
            tracing::debug!("project or host root empty, not building");
            return false;
        };

        tracing::info!(project = %job.project().display(), "starting build");
        self.error_message = None;
        self.status = BuildStatus::Running {
            project: job.project().to_path_buf(),
        };

        let config = self.config.clone();
        let (tx, rx) = channel();
        let worker = thread::spawn(move || {
            let env_root = host::resolve_env_root(&config.houdini_version);
            let guard = EnvironmentGuard::new(env_root.as_deref());
            let mut runner = BuildRunner::new(config, guard);
            runner.configure(job);

            let result = runner.build().map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        self.pending = Some(rx);
        self.worker = Some(worker);

        true
    }

    /// Collect the worker's result if it is done. Returns true when the
    /// status changed.
    pub fn poll_build(&mut self) -> bool {
        let Some(rx) = self.pending.as_ref() else {
            return false;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err("build worker stopped unexpectedly".to_string()),
        };

        if let Err(ref message) = result {
            self.error_message = Some(message.clone());
        }
        self.status = BuildStatus::Finished(result);
        self.pending = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        true
    }

    /// Block until the running build, including its restore step, is done.
    pub fn wait_for_build(&mut self) {
        if let Some(worker) = self.worker.take() {
            tracing::info!("waiting for the running build to restore the environment");
            let _ = worker.join();
        }
        self.poll_build();
    }

    /// Status line text.
    pub fn status_text(&self) -> String {
        match &self.status {
            BuildStatus::Idle => "Ready".to_string(),
            BuildStatus::Running { project } => format!("Building {}...", project.display()),
            BuildStatus::Finished(Ok(outcome)) => outcome.to_string(),
            BuildStatus::Finished(Err(message)) => message.clone(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        // The worker must reach `after_build` before the process exits.
        self.wait_for_build();
    }
}
