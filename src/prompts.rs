/*!
 * System prompt for transcript rewriting.
 *
 * The built-in prompt ships as a markdown asset compiled into the binary.
 * A prompt file named in the configuration or on the command line replaces it.
 */

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// The built-in transcript editing instructions
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("../assets/system_prompt.md");

/// Load the system prompt, preferring the given file over the built-in prompt
pub fn load_system_prompt(prompt_file: Option<&Path>) -> Result<String> {
    let Some(path) = prompt_file else {
        return Ok(DEFAULT_SYSTEM_PROMPT.to_string());
    };

    let prompt = fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt file: {:?}", path))?;

    if prompt.trim().is_empty() {
        return Err(anyhow!("Prompt file is empty: {:?}", path));
    }

    log::debug!("Loaded system prompt from {:?} ({} chars)", path, prompt.chars().count());
    Ok(prompt)
}
