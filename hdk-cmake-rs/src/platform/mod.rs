//! Platform-specific module for native dialogs.
//!
//! Windows gets the shell folder picker; elsewhere the path fields are
//! edited by hand.

pub mod dialogs;

pub use dialogs::{pick_folder, DialogError, NATIVE_FOLDER_PICKER};
