/*!
 * Common test utilities for the scribedown test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates one file per name, each holding `transcript_of(name)`
pub fn create_transcript_dir(names: &[&str]) -> Result<TempDir> {
    let dir = create_temp_dir()?;
    for name in names {
        create_test_file(dir.path(), name, &transcript_of(name))?;
    }
    Ok(dir)
}

/// The content `create_transcript_dir` writes for a file name
pub fn transcript_of(name: &str) -> String {
    format!("transcript of {}", name)
}

/// A sample raw transcript
pub fn sample_transcript() -> &'static str {
    "um so welcome everyone uh today we're going to talk about like testing you know \
     and um the first thing is that tests should be fast"
}
