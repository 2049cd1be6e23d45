use crate::shared::error::ScanError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum snapshot size (100 MB)
/// Snapshots embed license file and README text, so they can be large.
pub const MAX_SNAPSHOT_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size for configuration and ruleset files (1 MB)
pub const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ScanError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read metadata for {} operation: {}", operation, e),
    })?;

    if metadata.is_symlink() {
        return Err(ScanError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} operations on symbolic links are not allowed",
                operation
            ),
            hint: "Point to the real file instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "snapshot", "config file")
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    validate_not_symlink(path, "read")?;

    let metadata = fs::metadata(path).map_err(|e| ScanError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if !metadata.is_file() {
        return Err(ScanError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Arguments
/// * `file_size` - The size of the file in bytes
/// * `path` - The path to the file (for error messages)
/// * `max_size` - Maximum allowed size in bytes
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(ScanError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Split the input or remove unneeded license text".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reads a file as UTF-8 after the symlink, file-type and size checks
///
/// # Arguments
/// * `path` - File to read
/// * `file_description` - Human-readable description for error messages
/// * `max_size` - Maximum allowed size in bytes
pub fn read_checked_file(path: &Path, file_description: &str, max_size: u64) -> Result<String> {
    validate_regular_file(path, file_description)?;

    let size = fs::metadata(path)
        .map_err(|e| ScanError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?
        .len();
    validate_file_size(size, path, max_size)?;

    fs::read_to_string(path).map_err(|e| {
        ScanError::FileReadError {
            path: path.to_path_buf(),
            details: format!("Failed to read {}: {}", file_description, e),
        }
        .into()
    })
}
