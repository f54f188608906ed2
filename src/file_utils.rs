use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::errors::AppError;

// @module: File and directory utilities

/// What an input path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Regular file (symlinks followed)
    File,
    /// Directory (symlinks followed)
    Directory,
    /// Missing path or special file such as a socket or FIFO
    Other,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @returns: Kind of filesystem object at path
    pub fn classify_path<P: AsRef<Path>>(path: P) -> PathKind {
        match fs::metadata(path.as_ref()) {
            Ok(metadata) if metadata.is_file() => PathKind::File,
            Ok(metadata) if metadata.is_dir() => PathKind::Directory,
            _ => PathKind::Other,
        }
    }

    /// List the regular files directly inside a directory
    ///
    /// Not recursive. Entries come back sorted by file name bytes, so the
    /// order does not depend on the filesystem.
    pub fn list_dir_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, AppError> {
        let dir = dir.as_ref();
        let mut result = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                AppError::filesystem(path, e.into())
            })?;

            if entry.file_type().is_file() {
                result.push(entry.into_path());
            }
        }

        Ok(result)
    }

    /// Read a UTF-8 file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, AppError> {
        fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::filesystem(path.as_ref(), e))
    }

    /// Write a string to a file, replacing any existing file
    ///
    /// The content goes to a temporary file next to the destination and is
    /// renamed into place, so readers never observe a truncated file.
    /// The parent directory must already exist.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), AppError> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| AppError::filesystem(parent, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| AppError::filesystem(temp.path(), e))?;
        temp.persist(path)
            .map_err(|e| AppError::filesystem(path, e.error))?;

        Ok(())
    }
}
