//! Native folder picker.
//!
//! `pick_folder` returns `Ok(Some(path))` on confirmation and `Ok(None)` when
//! the user cancelled or no native picker exists on this platform.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Whether `pick_folder` can show a dialog on this platform.
pub const NATIVE_FOLDER_PICKER: bool = cfg!(windows);

/// Dialog error types.
#[derive(Debug, Error)]
pub enum DialogError {
    #[cfg(windows)]
    #[error("Shell dialog failed: {0}")]
    Shell(#[from] windows::core::Error),

    #[error("Selected path is not valid Unicode")]
    InvalidPath,
}

/// Show a modal "select folder" dialog starting at `start` when it exists.
#[cfg(windows)]
pub fn pick_folder(title: &str, start: Option<&Path>) -> Result<Option<PathBuf>, DialogError> {
    use windows::core::HSTRING;
    use windows::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CoTaskMemFree, CLSCTX_INPROC_SERVER,
        COINIT_APARTMENTTHREADED,
    };
    use windows::Win32::UI::Shell::{
        FileOpenDialog, IFileOpenDialog, IShellItem, SHCreateItemFromParsingName,
        FOS_FORCEFILESYSTEM, FOS_PICKFOLDERS, SIGDN_FILESYSPATH,
    };

    unsafe {
        // The window layer has usually initialised COM on this thread already;
        // S_FALSE is expected then.
        let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);

        let dialog: IFileOpenDialog = CoCreateInstance(&FileOpenDialog, None, CLSCTX_INPROC_SERVER)?;
        let options = dialog.GetOptions()?;
        dialog.SetOptions(options | FOS_PICKFOLDERS | FOS_FORCEFILESYSTEM)?;
        dialog.SetTitle(&HSTRING::from(title))?;

        if let Some(start) = start.filter(|p| p.is_dir()) {
            let folder: IShellItem =
                SHCreateItemFromParsingName(&HSTRING::from(start.as_os_str()), None)?;
            dialog.SetFolder(&folder)?;
        }

        if let Err(err) = dialog.Show(None) {
            if is_cancelled(&err) {
                return Ok(None);
            }
            return Err(DialogError::Shell(err));
        }

        let item = dialog.GetResult()?;
        let raw = item.GetDisplayName(SIGDN_FILESYSPATH)?;
        let path = raw.to_string();
        CoTaskMemFree(Some(raw.0 as *const _));

        path.map(|p| Some(PathBuf::from(p)))
            .map_err(|_| DialogError::InvalidPath)
    }
}

/// True for the HRESULT the shell dialog returns when the user dismisses it.
#[cfg(windows)]
fn is_cancelled(err: &windows::core::Error) -> bool {
    err.code() == windows::Win32::Foundation::ERROR_CANCELLED.to_hresult()
}

/// No native picker outside Windows.
#[cfg(not(windows))]
pub fn pick_folder(title: &str, start: Option<&Path>) -> Result<Option<PathBuf>, DialogError> {
    tracing::debug!(title, ?start, "no native folder picker on this platform");
    Ok(None)
}
