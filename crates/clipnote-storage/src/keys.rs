//! Validation of the path segments a storage writer is handed.

use crate::traits::{StorageError, StorageResult};

/// Check that a channel directory name is a single, plain path segment.
pub fn validate_dir(dir: &str) -> StorageResult<()> {
    if dir.is_empty() || dir == "." || dir.contains("..") || has_separator(dir) {
        return Err(StorageError::InvalidKey(format!(
            "Invalid destination directory: {}",
            dir
        )));
    }
    Ok(())
}

/// Check that a storage key names a single visible file.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.starts_with('.') || key.contains("..") || has_separator(key) {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }
    Ok(())
}

/// Name of the hidden sibling a key is streamed into before it is published.
pub fn part_file_name(key: &str) -> String {
    format!(".{}.part", key)
}

fn has_separator(segment: &str) -> bool {
    segment.contains('/') || segment.contains('\\') || segment.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_keys() {
        assert!(validate_key("1700000000000-123456789.png").is_ok());
        assert!(validate_key("1700000000000-5").is_ok());
        assert!(validate_key("1700000000000-5.").is_ok());
    }

    #[test]
    fn rejects_traversal_and_hidden_keys() {
        for key in ["", "../etc/passwd", "a/b.png", "a\\b.png", ".hidden", "x..y"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_nested_directories() {
        assert!(validate_dir("images").is_ok());
        assert!(validate_dir("images/nested").is_err());
        assert!(validate_dir("..").is_err());
        assert!(validate_dir("").is_err());
    }

    #[test]
    fn part_file_is_hidden() {
        assert_eq!(part_file_name("1-2.mp4"), ".1-2.mp4.part");
    }
}
