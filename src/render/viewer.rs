//! Hand a rendered file to the platform's default viewer

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ScanError;

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open `path` in the default viewer.
///
/// Waits for the launcher, not for the viewer window: `open`, `start` and
/// `xdg-open` return once the viewer has been handed the file.
pub fn open_in_viewer(path: &Path) -> Result<(), ScanError> {
    let mut cmd = viewer_command(path);
    debug!(command = ?cmd, "launching viewer");
    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| ScanError::Display {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(ScanError::Display {
            path: path.to_path_buf(),
            reason: format!("viewer exited with {}", status),
        });
    }
    Ok(())
}
