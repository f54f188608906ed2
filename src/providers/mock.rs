/*!
 * Mock rewriter for testing.
 *
 * This module provides a stub rewriter that simulates different behaviors:
 * - `MockRewriter::echo()` - Returns every transcript unchanged
 * - `MockRewriter::fixed()` - Returns the same text for every transcript
 * - `MockRewriter::failing_on()` - Fails on the Nth call only
 * - `MockRewriter::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::rewriter::TextRewriter;

/// Behavior mode for the mock rewriter
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the transcript unchanged
    Echo,
    /// Returns the given text regardless of input
    Fixed(String),
    /// Fails on the given 1-based call, succeeds (echo) otherwise
    FailOn { call: usize },
    /// Always fails with an error
    Failing,
    /// Answers with a response lacking message content
    MissingContent,
}

/// Mock rewriter that records every transcript it receives
#[derive(Debug)]
pub struct MockRewriter {
    behavior: MockBehavior,
    call_count: AtomicUsize,
    received: Mutex<Vec<String>>,
}

impl MockRewriter {
    /// Create a new mock rewriter with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    pub fn failing_on(call: usize) -> Self {
        Self::new(MockBehavior::FailOn { call })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of rewrite calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Transcripts received, in call order
    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextRewriter for MockRewriter {
    async fn rewrite(&self, transcript: &str) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut received) = self.received.lock() {
            received.push(transcript.to_string());
        }

        match &self.behavior {
            MockBehavior::Echo => Ok(transcript.to_string()),
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::FailOn { call: failing_call } if *failing_call == call => {
                Err(ProviderError::ApiError {
                    status_code: 500,
                    message: format!("Simulated failure on call {}", call),
                })
            }
            MockBehavior::FailOn { .. } => Ok(transcript.to_string()),
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            MockBehavior::MissingContent => Err(ProviderError::MissingContent),
        }
    }
}
