use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a saved GraphQL response or config file (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Reads a text file after checking that it is a regular file (not a symlink)
/// and that it does not exceed `max_size` bytes.
///
/// # Arguments
/// * `path` - The file to read
/// * `file_description` - Human readable description used in error messages
/// * `max_size` - Maximum allowed size in bytes
///
/// # Errors
/// Returns `VsmDiagramError::FileRead` if the path is missing, is a symlink,
/// is not a regular file, is too large, or cannot be decoded as UTF-8.
pub fn read_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<String> {
    let read_error = |details: String| VsmDiagramError::FileRead {
        path: path.to_path_buf(),
        details,
    };

    let metadata = fs::symlink_metadata(path)
        .map_err(|e| read_error(format!("Failed to read {} metadata: {}", file_description, e)))?;

    if metadata.is_symlink() {
        return Err(read_error(format!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            file_description
        ))
        .into());
    }

    if !metadata.is_file() {
        return Err(read_error(format!("{} is not a regular file", file_description)).into());
    }

    if metadata.len() > max_size {
        return Err(read_error(format!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            file_description,
            metadata.len(),
            max_size
        ))
        .into());
    }

    fs::read_to_string(path).map_err(|e| read_error(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_read_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("response.json");
        fs::write(&file_path, "{}").unwrap();

        let content = read_regular_file(&file_path, "GraphQL response", MAX_FILE_SIZE).unwrap();
        assert_eq!(content, "{}");
    }

    #[test]
    fn test_read_regular_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/response.json");
        let result = read_regular_file(&path, "GraphQL response", MAX_FILE_SIZE);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read file"));
    }

    #[test]
    fn test_read_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_regular_file(temp_dir.path(), "GraphQL response", MAX_FILE_SIZE);
        let err = format!("{:?}", result.unwrap_err());
        assert!(err.contains("not a regular file"));
    }

    #[test]
    fn test_read_regular_file_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("big.json");
        fs::write(&file_path, "0123456789").unwrap();

        let result = read_regular_file(&file_path, "GraphQL response", 5);
        let err = format!("{:?}", result.unwrap_err());
        assert!(err.contains("too large"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_regular_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = read_regular_file(&link, "GraphQL response", MAX_FILE_SIZE);
        let err = format!("{:?}", result.unwrap_err());
        assert!(err.contains("symbolic link"));
    }
}
