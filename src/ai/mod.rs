//! Generative-text collaborator.
//!
//! [`TextGenerator`] is the seam to the external service: one plain completion
//! and one schema-constrained completion, both single-shot with no retry.
//! [`Collaborator`] sits on top and never surfaces an error to the wizard:
//! a failed call is logged and replaced with a fixed fallback.
//!
//! Implementations: [`GeminiClient`] (HTTP) and [`OfflineGenerator`] (always
//! unavailable, used without an API key).

pub mod fallback;
pub mod gemini;
pub mod offline;
pub mod schema;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::course::{Lesson, OnboardingData, TemplateSuggestion};
use crate::errors::AiError;
use crate::prompts;

pub use fallback::{FALLBACK_TEXT, fallback_lessons, fallback_templates};
pub use gemini::GeminiClient;
pub use offline::OfflineGenerator;

/// Abstraction over the generative-text service for testability.
/// Real implementation: `GeminiClient`. Test doubles live in the tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Plain text completion.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;

    /// JSON completion constrained by `schema`.
    async fn complete_structured(&self, prompt: &str, schema: &Value) -> Result<Value, AiError>;
}

/// Fallback-producing wrapper around a [`TextGenerator`].
#[derive(Clone)]
pub struct Collaborator {
    generator: Arc<dyn TextGenerator>,
}

impl Collaborator {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    pub fn from_arc(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// A collaborator whose every call falls back.
    pub fn offline() -> Self {
        Self::new(OfflineGenerator::default())
    }

    /// Plain completion that propagates failure, for callers that would
    /// rather keep their current value than show the fallback text.
    pub async fn try_generate_text(&self, prompt: &str) -> Result<String, AiError> {
        tracing::debug!(prompt_len = prompt.len(), "Requesting text completion");
        self.generator.complete(prompt).await
    }

    /// Plain completion; failures become [`FALLBACK_TEXT`].
    pub async fn generate_text(&self, prompt: &str) -> String {
        match self.try_generate_text(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Text generation failed, using fallback");
                FALLBACK_TEXT.to_string()
            }
        }
    }

    /// Three course templates for the onboarding answers, or the fixed fallback template.
    pub async fn suggest_templates(&self, data: &OnboardingData) -> Vec<TemplateSuggestion> {
        let prompt = prompts::templates_prompt(data);
        self.structured_list(&prompt, &schema::templates_schema())
            .await
            .unwrap_or_else(|| {
                tracing::warn!(topic = %data.topic, "Template suggestion fell back");
                fallback_templates()
            })
    }

    /// Starter lessons for the onboarding answers, or the three fixed lessons.
    pub async fn suggest_lessons(&self, data: &OnboardingData) -> Vec<Lesson> {
        let prompt = prompts::lessons_prompt(data);
        self.structured_list(&prompt, &schema::lessons_schema())
            .await
            .unwrap_or_else(|| {
                tracing::warn!(topic = %data.topic, "Lesson suggestion fell back");
                fallback_lessons()
            })
    }

    /// Run a structured completion and decode a non-empty array of `T`.
    async fn structured_list<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Option<Vec<T>> {
        tracing::debug!(prompt_len = prompt.len(), "Requesting structured completion");
        let value = match self.generator.complete_structured(prompt, schema).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Structured generation failed");
                return None;
            }
        };

        match serde_json::from_value::<Vec<T>>(value) {
            Ok(items) if !items.is_empty() => Some(items),
            Ok(_) => {
                tracing::warn!("Structured generation returned an empty list");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Structured generation did not match the schema");
                None
            }
        }
    }
}

impl std::fmt::Debug for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborator").finish_non_exhaustive()
    }
}
