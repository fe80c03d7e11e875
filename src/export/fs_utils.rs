use crate::errors::{AppError, AppResult};
use crate::ui::messages::{ask_confirmation, info, warning};
use std::path::Path;

/// Check that the export target may be written.
///
/// A missing file, or `--force`, passes straight through; otherwise the
/// user is asked before an existing file is replaced.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    if ask_confirmation("Overwrite?") {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled, existing file not overwritten".into(),
        ))
    }
}
