//! Filesystem operations
//!
//! Directory creation, artifact relocation and atomic replacement of files
//! in the publish tree.

use std::io::Write;
use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Create the parent directory of `path`, if it has one
fn create_parent(path: &Path) -> Result<(), FilesystemError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Move a file, creating the destination's parent directories
///
/// Tries a rename first; when source and destination are on different
/// filesystems the file is copied and the source removed.
pub fn move_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    create_parent(to)?;

    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    let move_err = |e: std::io::Error| FilesystemError::MoveFile {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    };
    std::fs::copy(from, to).map_err(move_err)?;
    std::fs::remove_file(from).map_err(move_err)
}

/// Copy a file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    create_parent(to)?;
    std::fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| FilesystemError::CopyFile {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            error: e.to_string(),
        })
}

/// Mode for a file written where none existed before
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Permissions the replacement file should carry
///
/// An existing target keeps its mode; a new one gets [`NEW_FILE_MODE`]
/// rather than the owner-only mode of a temporary file.
fn replacement_permissions(path: &Path) -> Option<std::fs::Permissions> {
    if let Ok(metadata) = std::fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(std::fs::Permissions::from_mode(NEW_FILE_MODE))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Replace `path` with `content` atomically
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old or the new file.
/// The target's permissions survive the replacement.
pub fn write_file_atomic(path: &Path, content: &[u8]) -> Result<(), FilesystemError> {
    let write_err = |error: String| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
    file.write_all(content)
        .and_then(|()| match replacement_permissions(path) {
            Some(permissions) => file.as_file().set_permissions(permissions),
            None => Ok(()),
        })
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| write_err(e.to_string()))?;
    file.persist(path).map_err(|e| write_err(e.error.to_string()))?;
    Ok(())
}
