/*!
 * Integration tests for single file and batch runs against a stub rewriter
 */

use std::fs;
use anyhow::Result;
use scribedown::errors::{AppError, ProviderError};
use scribedown::orchestrator::{BatchOrchestrator, InputMode};
use scribedown::providers::mock::MockRewriter;
use crate::common;

/// Every qualifying file is rewritten once and the rest are ignored
#[tokio::test]
async fn test_batch_withMixedFiles_shouldRewriteOnlyTranscripts() -> Result<()> {
    let dir = common::create_transcript_dir(&["a.txt", "b.text", "c.transcript", "notes.md", "d.TXT"])?;
    let out_dir = common::create_temp_dir()?;
    let output = out_dir.path().join("out.md");

    let rewriter = MockRewriter::echo();
    let summary = BatchOrchestrator::new(&rewriter).run(dir.path(), &output).await?;

    assert_eq!(summary.mode, InputMode::Batch);
    assert_eq!(summary.files, 3);
    assert_eq!(rewriter.call_count(), 3);

    let mut received = rewriter.received();
    received.sort();
    assert_eq!(received, vec![
        common::transcript_of("a.txt"),
        common::transcript_of("b.text"),
        common::transcript_of("c.transcript"),
    ]);

    Ok(())
}

#[tokio::test]
async fn test_batch_withNumberedParts_shouldAssembleInNumericOrder() -> Result<()> {
    let dir = common::create_transcript_dir(&["part10.txt", "intro.txt", "part2.txt"])?;
    let out_dir = common::create_temp_dir()?;
    let output = out_dir.path().join("talk.md");

    let rewriter = MockRewriter::echo();
    let summary = BatchOrchestrator::new(&rewriter).run(dir.path(), &output).await?;

    let expected = format!(
        "{}\n\n---\n\n{}\n\n---\n\n{}\n\n---\n\n",
        common::transcript_of("intro.txt"),
        common::transcript_of("part2.txt"),
        common::transcript_of("part10.txt"),
    );
    let written = fs::read_to_string(&output)?;
    assert_eq!(written, expected);
    assert_eq!(summary.bytes_written, expected.len());

    Ok(())
}

/// Files are sent in name order and equal numbers keep that order
#[tokio::test]
async fn test_batch_withTiedNumbers_shouldCallAndAssembleInNameOrder() -> Result<()> {
    let dir = common::create_transcript_dir(&["z.txt", "c1.txt", "m.txt", "b1.txt", "a1.txt"])?;

    let rewriter = MockRewriter::echo();
    let results = BatchOrchestrator::new(&rewriter).rewrite_directory(dir.path()).await?;

    let expected = ["a1.txt", "b1.txt", "c1.txt", "m.txt", "z.txt"];
    let calls: Vec<String> = expected.iter().map(|name| common::transcript_of(name)).collect();
    assert_eq!(rewriter.received(), calls);

    let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, expected);

    Ok(())
}

#[tokio::test]
async fn test_batch_withTwoFiles_shouldTerminateWithSeparator() -> Result<()> {
    let dir = common::create_temp_dir()?;
    common::create_test_file(dir.path(), "1.txt", "A")?;
    common::create_test_file(dir.path(), "2.txt", "B")?;
    let output = dir.path().join("out.md");

    let rewriter = MockRewriter::echo();
    BatchOrchestrator::new(&rewriter).run(dir.path(), &output).await?;

    assert_eq!(fs::read_to_string(&output)?, "A\n\n---\n\nB\n\n---\n\n");

    Ok(())
}

/// Single file mode writes the rewritten text with no separator
#[tokio::test]
async fn test_single_withAnyExtension_shouldWriteVerbatim() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_file(dir.path(), "lecture.md", common::sample_transcript())?;
    let output = dir.path().join("lecture.out.md");

    let rewriter = MockRewriter::fixed("# Testing\n\nTests should be fast.");
    let summary = BatchOrchestrator::new(&rewriter).run(&input, &output).await?;

    assert_eq!(summary.mode, InputMode::Single);
    assert_eq!(summary.files, 1);
    assert_eq!(rewriter.received(), vec![common::sample_transcript().to_string()]);
    assert_eq!(fs::read_to_string(&output)?, "# Testing\n\nTests should be fast.");

    Ok(())
}

#[tokio::test]
async fn test_single_withExistingOutput_shouldOverwrite() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_file(dir.path(), "talk.txt", "raw")?;
    let output = common::create_test_file(dir.path(), "talk.md", "stale output from an earlier run")?;

    let rewriter = MockRewriter::fixed("fresh");
    BatchOrchestrator::new(&rewriter).run(&input, &output).await?;

    assert_eq!(fs::read_to_string(&output)?, "fresh");

    Ok(())
}

#[tokio::test]
async fn test_batch_withEmptyDirectory_shouldFailWithNoInput() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let out_dir = common::create_temp_dir()?;
    let output = out_dir.path().join("out.md");

    let rewriter = MockRewriter::echo();
    let result = BatchOrchestrator::new(&rewriter).run(dir.path(), &output).await;

    assert!(matches!(result, Err(AppError::NoInput(_))));
    assert!(!output.exists());

    Ok(())
}

#[tokio::test]
async fn test_batch_withOnlyUnrecognizedFiles_shouldFailWithoutCalls() -> Result<()> {
    let dir = common::create_transcript_dir(&["readme.md", "audio.mp3", "talk.TXT"])?;
    let out_dir = common::create_temp_dir()?;
    let output = out_dir.path().join("out.md");

    let rewriter = MockRewriter::echo();
    let result = BatchOrchestrator::new(&rewriter).run(dir.path(), &output).await;

    assert!(matches!(result, Err(AppError::NoInput(_))));
    assert_eq!(rewriter.call_count(), 0);
    assert!(!output.exists());

    Ok(())
}

/// A failure part-way through stops the batch and leaves no output
#[tokio::test]
async fn test_batch_withFailureOnSecondFile_shouldAbortWithoutOutput() -> Result<()> {
    let dir = common::create_transcript_dir(&["1.txt", "2.txt", "3.txt"])?;
    let out_dir = common::create_temp_dir()?;
    let output = out_dir.path().join("out.md");

    let rewriter = MockRewriter::failing_on(2);
    let result = BatchOrchestrator::new(&rewriter).run(dir.path(), &output).await;

    match result {
        Err(AppError::RemoteService { file, source }) => {
            assert!(file.ends_with(".txt"));
            assert!(matches!(source, ProviderError::ApiError { status_code: 500, .. }));
        }
        other => panic!("expected RemoteService error, got {:?}", other),
    }
    assert_eq!(rewriter.call_count(), 2);
    assert!(!output.exists());

    Ok(())
}

#[tokio::test]
async fn test_single_withFailingRewriter_shouldKeepExistingOutput() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_file(dir.path(), "talk.txt", "raw")?;
    let output = common::create_test_file(dir.path(), "talk.md", "previous")?;

    let rewriter = MockRewriter::failing();
    let result = BatchOrchestrator::new(&rewriter).run(&input, &output).await;

    assert!(matches!(result, Err(AppError::RemoteService { .. })));
    assert_eq!(fs::read_to_string(&output)?, "previous");

    Ok(())
}

#[tokio::test]
async fn test_batch_withMissingOutputDirectory_shouldFailWithFilesystemError() -> Result<()> {
    let dir = common::create_transcript_dir(&["1.txt"])?;
    let output = dir.path().join("missing").join("out.md");

    let rewriter = MockRewriter::echo();
    let result = BatchOrchestrator::new(&rewriter).run(dir.path(), &output).await;

    assert!(matches!(result, Err(AppError::Filesystem { .. })));
    assert_eq!(rewriter.call_count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_rewriteDirectory_shouldReturnResultsInAssemblyOrder() -> Result<()> {
    let dir = common::create_transcript_dir(&["b.txt", "a.txt", "C.txt"])?;

    let rewriter = MockRewriter::echo();
    let results = BatchOrchestrator::new(&rewriter).rewrite_directory(dir.path()).await?;

    let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "C.txt"]);
    assert_eq!(results[0].content, common::transcript_of("a.txt"));

    Ok(())
}
