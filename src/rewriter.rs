/*!
 * Transcript rewriting through a chat-completion provider.
 *
 * `TextRewriter` is the seam the batch orchestrator depends on; the real
 * implementation is `TranscriptRewriter`, tests use `MockRewriter`.
 */

use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use crate::app_config::RewriteConfig;
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Turns one raw transcript into markdown
#[async_trait]
pub trait TextRewriter: Send + Sync {
    /// Rewrite a transcript, returning the service output unmodified
    async fn rewrite(&self, transcript: &str) -> Result<String, ProviderError>;
}

/// Rewriter backed by an OpenAI-compatible chat-completion service
#[derive(Debug)]
pub struct TranscriptRewriter {
    client: OpenAI,
    model: String,
    system_prompt: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl TranscriptRewriter {
    /// Build a rewriter for the active provider of the given configuration
    pub fn new(config: &RewriteConfig, system_prompt: impl Into<String>) -> Result<Self, ProviderError> {
        let model = config.get_model();
        let client = OpenAI::new(
            config.get_api_key(),
            config.get_endpoint(),
            model.clone(),
            Duration::from_secs(config.get_timeout_secs()),
        )?;

        Ok(Self {
            client,
            model,
            system_prompt: system_prompt.into(),
            temperature: config.common.temperature,
            max_tokens: config.common.max_tokens,
        })
    }

    /// Build the two-message request for one transcript
    pub fn build_request(&self, transcript: &str) -> OpenAIRequest {
        let mut request = OpenAIRequest::new(&self.model)
            .add_message("system", &self.system_prompt)
            .add_message("user", transcript);

        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.max_tokens(max_tokens);
        }
        request
    }

    /// Check that the service is reachable with the configured credentials
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.client.test_connection().await
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextRewriter for TranscriptRewriter {
    async fn rewrite(&self, transcript: &str) -> Result<String, ProviderError> {
        debug!("Sending {} chars to {}", transcript.chars().count(), self.model);

        let response = self.client.complete(self.build_request(transcript)).await?;
        OpenAI::extract_text(&response).ok_or(ProviderError::MissingContent)
    }
}
