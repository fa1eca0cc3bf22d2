use std::path::{Path, PathBuf};

use eyre::{Context, Result};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the same content and was left alone
    Unchanged,
}

/// A generated script to be written to disk
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Check if the file on disk already holds this content
    pub fn is_current(&self) -> bool {
        std::fs::read_to_string(&self.path).is_ok_and(|existing| existing == self.content)
    }

    /// Write the file unless its content is unchanged.
    ///
    /// Rewriting identical content would still bump the modification time
    /// and make the host recompile.
    pub fn write(&self) -> Result<WriteResult> {
        if self.is_current() {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Assets").join("Weaver").join("Layers.cs");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Tags.cs");

        let file = File::new(&path, "class Tags {}");
        assert!(!file.exists());

        let result = file.write().unwrap();
        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "class Tags {}");
    }

    #[test]
    fn test_file_write_overwrites_changed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Tags.cs");
        fs::write(&path, "old").unwrap();

        let result = File::new(&path, "new").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_file_write_skips_identical() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Tags.cs");
        fs::write(&path, "same").unwrap();

        let file = File::new(&path, "same");
        assert!(file.is_current());
        assert_eq!(file.write().unwrap(), WriteResult::Unchanged);
    }
}
