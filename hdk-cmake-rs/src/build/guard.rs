//! User environment guard.
//!
//! Houdini picks up `packages/` and `houdini.env` from the per-user
//! environment folder, which can break a CMake configure run. The guard
//! renames both to `<name>_back` before the build and restores them after.
//!
//! The filesystem is the only state: the guard is `Guarded` while any backup
//! exists, so a restore works even after the tool was restarted mid-build.
//! Every filesystem failure is logged and skipped so the restore step always
//! gets its turn.

use super::job::BuildListener;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to an entry while it is moved aside.
pub const BACKUP_SUFFIX: &str = "_back";

/// Entries moved aside during a build, relative to the environment root.
pub const GUARDED_NAMES: [&str; 2] = ["packages", "houdini.env"];

/// Guard state as observed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No backups present
    Normal,

    /// At least one entry is moved aside
    Guarded,
}

/// A live path and its backup location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedEntry {
    pub live: PathBuf,
    pub backup: PathBuf,
}

impl GuardedEntry {
    pub fn new(live: PathBuf) -> Self {
        let mut backup = live.clone().into_os_string();
        backup.push(BACKUP_SUFFIX);
        Self {
            live,
            backup: PathBuf::from(backup),
        }
    }
}

/// What a transition did.
#[derive(Debug, Default)]
pub struct GuardReport {
    /// Paths that were renamed (source side)
    pub renamed: Vec<PathBuf>,

    /// Stale backups removed because the live path won
    pub discarded: Vec<PathBuf>,

    /// Paths whose rename or removal failed
    pub failed: Vec<(PathBuf, io::ErrorKind)>,
}

impl GuardReport {
    pub fn is_noop(&self) -> bool {
        self.renamed.is_empty() && self.discarded.is_empty() && self.failed.is_empty()
    }

    fn fail(&mut self, path: &Path, action: &str, err: io::Error) {
        tracing::warn!(path = %path.display(), error = %err, "failed to {action}");
        self.failed.push((path.to_path_buf(), err.kind()));
    }
}

/// Moves the Houdini user environment out of the way around a build.
#[derive(Debug, Clone)]
pub struct EnvironmentGuard {
    entries: Vec<GuardedEntry>,
}

impl EnvironmentGuard {
    /// Guard the standard entries under `env_root`. Without a root there is
    /// nothing to guard and both transitions are no-ops.
    pub fn new(env_root: Option<&Path>) -> Self {
        let entries = env_root
            .map(|root| {
                GUARDED_NAMES
                    .iter()
                    .map(|name| GuardedEntry::new(root.join(name)))
                    .collect()
            })
            .unwrap_or_default();

        Self { entries }
    }

    pub fn entries(&self) -> &[GuardedEntry] {
        &self.entries
    }

    /// Current state, read from the filesystem.
    pub fn state(&self) -> GuardState {
        if self.entries.iter().any(|e| e.backup.exists()) {
            GuardState::Guarded
        } else {
            GuardState::Normal
        }
    }

    /// Normal -> Guarded: rename each present entry to its backup name.
    pub fn before(&self) -> GuardReport {
        let mut report = GuardReport::default();

        for entry in &self.entries {
            if !entry.live.exists() {
                continue;
            }
            if entry.backup.exists() {
                // An earlier backup is still around; don't clobber it.
                tracing::warn!(
                    backup = %entry.backup.display(),
                    "backup already present, leaving live entry in place"
                );
                continue;
            }

            match fs::rename(&entry.live, &entry.backup) {
                Ok(()) => {
                    tracing::info!(path = %entry.live.display(), "moved aside");
                    report.renamed.push(entry.live.clone());
                }
                Err(err) => report.fail(&entry.live, "move aside", err),
            }
        }

        report
    }

    /// Guarded -> Normal: restore each backup. When the live path exists as
    /// well, the live path wins and the backup is removed.
    pub fn after(&self) -> GuardReport {
        let mut report = GuardReport::default();

        for entry in &self.entries {
            if !entry.backup.exists() {
                continue;
            }

            if entry.live.exists() {
                discard_backup(entry, &mut report);
                continue;
            }

            match fs::rename(&entry.backup, &entry.live) {
                Ok(()) => {
                    tracing::info!(path = %entry.live.display(), "restored");
                    report.renamed.push(entry.backup.clone());
                }
                Err(err) => restore_failed(entry, err, &mut report),
            }
        }

        report
    }
}

impl BuildListener for EnvironmentGuard {
    fn before_build(&mut self) {
        let report = self.before();
        tracing::debug!(?report, "environment guarded");
    }

    fn after_build(&mut self) {
        let report = self.after();
        tracing::debug!(?report, "environment restored");
    }
}

/// A restore rename failed. If the live path appeared in the meantime it
/// wins over the backup.
fn restore_failed(entry: &GuardedEntry, err: io::Error, report: &mut GuardReport) {
    report.fail(&entry.backup, "restore", err);
    if entry.live.exists() && entry.backup.exists() {
        discard_backup(entry, report);
    }
}

fn discard_backup(entry: &GuardedEntry, report: &mut GuardReport) {
    match remove_path(&entry.backup) {
        Ok(()) => {
            tracing::info!(
                backup = %entry.backup.display(),
                "live entry recreated during build, discarded backup"
            );
            report.discarded.push(entry.backup.clone());
        }
        Err(err) => report.fail(&entry.backup, "discard backup", err),
    }
}

fn remove_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
