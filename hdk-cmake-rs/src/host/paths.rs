//! Install-root and environment-root resolution.
//!
//! Every function takes the version explicitly and touches the filesystem
//! only to check existence; results are never cached.

use std::path::{Path, PathBuf};

/// Candidate install root for `version` following the platform's default
/// installer layout. `None` on platforms without a known layout.
pub fn install_root_candidate(version: &str) -> Option<PathBuf> {
    if cfg!(windows) {
        Some(PathBuf::from(format!(
            "C:/Program Files/Side Effects Software/Houdini {version}"
        )))
    } else if cfg!(target_os = "macos") {
        Some(PathBuf::from(format!(
            "/Applications/Houdini/Houdini{version}/Frameworks/Houdini.framework/Versions/Current/Resources"
        )))
    } else if cfg!(target_os = "linux") {
        Some(PathBuf::from(format!("/opt/hfs{version}")))
    } else {
        None
    }
}

/// Resolve the Houdini install root, if it is present on disk.
pub fn resolve_install_root(version: &str) -> Option<PathBuf> {
    let resolved = install_root_candidate(version).and_then(existing);
    tracing::debug!(version, ?resolved, "resolved install root");
    resolved
}

/// Folder name of the per-user environment: `houdini<major>.<minor>`.
pub fn env_folder_name(version: &str) -> String {
    let short: Vec<&str> = version.splitn(3, '.').take(2).collect();
    format!("houdini{}", short.join("."))
}

/// Environment root for `version` under the given Documents folder.
pub fn env_root_in(documents: &Path, version: &str) -> PathBuf {
    documents.join(env_folder_name(version))
}

/// Resolve the per-user environment root, if it is present on disk.
///
/// Only Windows keeps the environment under Documents; elsewhere this always
/// returns `None`.
pub fn resolve_env_root(version: &str) -> Option<PathBuf> {
    if !cfg!(windows) {
        return None;
    }

    let resolved = dirs::document_dir()
        .map(|documents| env_root_in(&documents, version))
        .and_then(existing);
    tracing::debug!(version, ?resolved, "resolved environment root");
    resolved
}

/// Keep `path` only if it exists.
pub fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}
