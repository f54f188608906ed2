/*!
 * Batch orchestration.
 *
 * Classifies the input path, drives one rewrite per transcript, orders and
 * assembles the results, and writes the output document. Any failure aborts
 * the run before the output file is touched.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::file_utils::{FileManager, PathKind};
use crate::rewriter::TextRewriter;

pub mod ordering;

pub use ordering::{SEPARATOR, TRANSCRIPT_EXTENSIONS, assemble, compare_names, is_transcript_name, sort_by_name};

/// A transcript read from disk
#[derive(Debug, Clone)]
pub struct TranscriptInput {
    pub file_name: String,
    pub content: String,
}

/// The rewritten markdown for one transcript
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteResult {
    pub file_name: String,
    pub content: String,
}

/// How the input path was processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Single,
    Batch,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub mode: InputMode,
    /// Number of transcripts rewritten
    pub files: usize,
    /// Size of the written document in bytes
    pub bytes_written: usize,
}

/// Drives rewrites for a single file or a directory of transcripts
pub struct BatchOrchestrator<'a, R: TextRewriter + ?Sized> {
    rewriter: &'a R,
    show_progress: bool,
}

impl<'a, R: TextRewriter + ?Sized> BatchOrchestrator<'a, R> {
    pub fn new(rewriter: &'a R) -> Self {
        Self {
            rewriter,
            show_progress: false,
        }
    }

    /// Draw a progress bar on stderr while a batch runs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Process `input` and write the resulting document to `output`
    pub async fn run(&self, input: &Path, output: &Path) -> Result<RunSummary, AppError> {
        let (mode, files, document) = match FileManager::classify_path(input) {
            PathKind::File => {
                info!("Processing single transcript file...");
                let result = self.rewrite_file(input, None).await?;
                (InputMode::Single, 1, result.content)
            }
            PathKind::Directory => {
                info!("Processing directory of transcript files...");
                let results = self.rewrite_directory(input).await?;
                let files = results.len();
                let document = assemble(results.iter().map(|r| r.content.as_str()));
                (InputMode::Batch, files, document)
            }
            PathKind::Other => return Err(AppError::InvalidPath(input.to_path_buf())),
        };

        FileManager::write_atomic(output, &document)?;
        info!("✓ Saved markdown file: {}", output.display());

        Ok(RunSummary {
            mode,
            files,
            bytes_written: document.len(),
        })
    }

    /// Rewrite every transcript in a directory and return the results in
    /// assembly order
    pub async fn rewrite_directory(&self, dir: &Path) -> Result<Vec<RewriteResult>, AppError> {
        let inputs = collect_transcripts(dir)?;
        info!("Found {} transcript files to process.", inputs.len());

        let progress = self.progress_bar(inputs.len());
        let mut results = Vec::with_capacity(inputs.len());
        for path in &inputs {
            let result = self.rewrite_file(path, progress.as_ref()).await;
            match result {
                Ok(result) => {
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    results.push(result);
                }
                Err(e) => {
                    if let Some(pb) = &progress {
                        pb.abandon_with_message("failed");
                    }
                    return Err(e);
                }
            }
        }
        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        sort_by_name(&mut results, |r| r.file_name.as_str());
        debug!(
            "Assembly order: {}",
            results.iter().map(|r| r.file_name.as_str()).collect::<Vec<_>>().join(", ")
        );
        Ok(results)
    }

    async fn rewrite_file(&self, path: &Path, progress: Option<&ProgressBar>) -> Result<RewriteResult, AppError> {
        let log_line = |line: String| match progress {
            Some(pb) => pb.suspend(|| info!("{}", line)),
            None => info!("{}", line),
        };

        log_line(format!("Processing: {}", path.display()));
        let input = read_transcript(path)?;

        if let Some(pb) = progress {
            pb.set_message(input.file_name.clone());
        }

        let content = self.rewriter
            .rewrite(&input.content)
            .await
            .map_err(|e| AppError::remote(&input.file_name, e))?;

        log_line(format!("✓ Successfully processed: {}", input.file_name));
        Ok(RewriteResult {
            file_name: input.file_name,
            content,
        })
    }

    fn progress_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let pb = ProgressBar::new(len as u64);
        pb.set_style(style.progress_chars("█▓▒░"));
        Some(pb)
    }
}

/// Qualifying transcript files in a directory, in enumeration order
pub fn collect_transcripts(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let transcripts: Vec<PathBuf> = FileManager::list_dir_files(dir)?
        .into_iter()
        .filter(|path| is_transcript_name(&file_name_of(path)))
        .collect();

    if transcripts.is_empty() {
        return Err(AppError::NoInput(dir.to_path_buf()));
    }
    Ok(transcripts)
}

/// Read one transcript from disk
pub fn read_transcript(path: &Path) -> Result<TranscriptInput, AppError> {
    Ok(TranscriptInput {
        file_name: file_name_of(path),
        content: FileManager::read_to_string(path)?,
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
