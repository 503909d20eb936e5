use crate::shared::error::MergeError;
use crate::shared::Result;
use std::fs::Metadata;
use std::path::Path;

/// Maximum input file size (100 MB)
///
/// BOM documents for large monorepos can run to tens of megabytes; anything
/// beyond this limit is rejected before it is read into memory.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Checks symlink-free metadata of a file that is about to be read.
///
/// `metadata` must come from `symlink_metadata` (std or tokio) so that the
/// link itself is inspected rather than its target.
///
/// # Errors
/// Returns a [`MergeError::SecurityError`] if:
/// - The path is a symbolic link
/// - The file exceeds `max_size`
///
/// and a [`MergeError::FileReadError`] if the path is not a regular file.
pub fn check_readable_file(
    metadata: &Metadata,
    path: &Path,
    file_description: &str,
    max_size: u64,
) -> Result<()> {
    if metadata.file_type().is_symlink() {
        return Err(MergeError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed. Pass the path of the target file instead."
                .to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(MergeError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    let file_size = metadata.len();
    if file_size > max_size {
        return Err(MergeError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_description, file_size, max_size
            ),
            hint: "Split the document or raise the limit in a custom reader.".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that an existing output path is not a symbolic link
///
/// A missing path is accepted; the writer will create it.
pub fn check_writable_target(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => Err(MergeError::SecurityError {
            path: path.to_path_buf(),
            reason: "Output path is a symbolic link".to_string(),
            hint: "Writing through symbolic links is not allowed. Choose a regular file path."
                .to_string(),
        }
        .into()),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MergeError::FileWriteError {
            path: path.to_path_buf(),
            details: format!("Failed to read file metadata: {}", e),
        }
        .into()),
    }
}
