/*!
 * # scribedown - transcripts to markdown
 *
 * A Rust library and CLI that turns raw speech transcripts into polished
 * markdown documents with an LLM chat-completion service.
 *
 * ## Features
 *
 * - Rewrite a single transcript file, or every transcript in a directory
 * - Numeric-aware ordering of batch results (`part2` before `part10`)
 * - OpenAI-compatible providers:
 *   - OpenRouter
 *   - OpenAI API
 *   - LM Studio (local)
 * - Replaceable system prompt
 * - Atomic output writes
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `prompts`: Built-in system prompt and prompt file loading
 * - `providers`: Chat-completion client and a mock rewriter for tests
 * - `rewriter`: One transcript in, one markdown document out
 * - `orchestrator`: Single-file and batch runs, ordering and assembly
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod rewriter;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError};
pub use orchestrator::{BatchOrchestrator, RewriteResult, RunSummary};
pub use rewriter::{TextRewriter, TranscriptRewriter};
