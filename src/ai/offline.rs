use async_trait::async_trait;
use serde_json::Value;

use crate::ai::TextGenerator;
use crate::errors::AiError;

/// Generator used when no API key is configured or `--offline` is passed.
/// Every call fails, so the collaborator always serves its fallbacks.
#[derive(Debug, Clone)]
pub struct OfflineGenerator {
    reason: String,
}

impl OfflineGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for OfflineGenerator {
    fn default() -> Self {
        Self::new("offline mode")
    }
}

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::Unavailable(self.reason.clone()))
    }

    async fn complete_structured(&self, _prompt: &str, _schema: &Value) -> Result<Value, AiError> {
        Err(AiError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_always_unavailable() {
        let generator = OfflineGenerator::new("no API key");
        match generator.complete("p").await {
            Err(AiError::Unavailable(reason)) => assert_eq!(reason, "no API key"),
            other => panic!("Expected Unavailable, got {:?}", other),
        }
        assert!(generator.complete_structured("p", &Value::Null).await.is_err());
    }
}
