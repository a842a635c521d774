//! Houdini host lookup.
//!
//! Locates the Houdini install root and the per-user environment folder for
//! a given version. A missing directory is a normal outcome and is reported
//! as `None`.

pub mod paths;

pub use paths::{
    env_folder_name, env_root_in, existing, install_root_candidate, resolve_env_root,
    resolve_install_root,
};
