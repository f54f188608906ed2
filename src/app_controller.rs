use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::time::Instant;

use crate::app_config::Config;
use crate::orchestrator::{BatchOrchestrator, RunSummary};
use crate::prompts;
use crate::rewriter::TranscriptRewriter;

// @module: Application controller for transcript rewriting

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Rewriter built from the active provider
    rewriter: TranscriptRewriter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let system_prompt = prompts::load_system_prompt(config.rewrite.common.system_prompt_file.as_deref())
            .context("Failed to load system prompt")?;
        let rewriter = TranscriptRewriter::new(&config.rewrite, system_prompt)
            .context("Failed to create rewrite client")?;

        Ok(Self { config, rewriter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rewriter(&self) -> &TranscriptRewriter {
        &self.rewriter
    }

    /// Rewrite `input_path` (file or directory) into `output_file`
    pub async fn run(&self, input_path: &Path, output_file: &Path) -> Result<RunSummary> {
        let start_time = Instant::now();
        info!(
            "Using {} ({})",
            self.config.rewrite.provider.display_name(),
            self.rewriter.model()
        );

        let summary = BatchOrchestrator::new(&self.rewriter)
            .with_progress(true)
            .run(input_path, output_file)
            .await?;

        info!(
            "✅ Conversion completed successfully! {} file(s) in {}.",
            summary.files,
            Self::format_duration(start_time.elapsed())
        );
        Ok(summary)
    }

    /// Send a minimal request to verify endpoint, model and credentials
    pub async fn check_connection(&self) -> Result<()> {
        let endpoint = self.config.rewrite.get_endpoint();
        self.rewriter
            .test_connection()
            .await
            .with_context(|| format!("Connection test against {} failed", endpoint))?;
        info!("Connection to {} OK (model: {})", endpoint, self.rewriter.model());
        Ok(())
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
