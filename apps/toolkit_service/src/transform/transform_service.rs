use std::sync::Arc;

use toolkit_llm::{ChatMessage, CompletionRequest, CompletionService};

use super::{transform_error::TransformError, transformation_type::TransformationType};

pub const COMPLETION_MODEL: &str = "gpt-4.1-nano";
pub const TEMPERATURE: f32 = 0.5;
pub const MAX_OUTPUT_TOKENS: u32 = 250;
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that transforms text based on user instructions.";

/// Builds the two-message prompt sent for every transformation.
pub fn build_completion_request(instruction: &str, original_text: &str) -> CompletionRequest {
    CompletionRequest {
        model: COMPLETION_MODEL.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!("{}\n\n--- TEXT ---\n{}", instruction, original_text)),
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_OUTPUT_TOKENS,
    }
}

#[derive(Clone)]
pub struct TransformService {
    completion: Arc<dyn CompletionService + Send + Sync>,
}

impl TransformService {
    pub fn new(completion: Arc<dyn CompletionService + Send + Sync>) -> Self {
        Self { completion }
    }

    pub async fn transform(
        &self,
        transformation_type: &str,
        original_text: &str,
    ) -> Result<String, TransformError> {
        let kind = transformation_type
            .parse::<TransformationType>()
            .inspect_err(|e| tracing::warn!("{}", e))?;

        tracing::info!("Requesting '{}' transformation", kind);
        self.invoke(kind.instruction(), original_text).await
    }

    /// Sends one completion request and returns the trimmed text of the
    /// first candidate. Failures are not retried.
    pub async fn invoke(
        &self,
        instruction: &str,
        original_text: &str,
    ) -> Result<String, TransformError> {
        let request = build_completion_request(instruction, original_text);

        match self.completion.complete(request).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                tracing::error!("Error calling completion service: {:#}", e);
                Err(TransformError::CompletionService(e))
            }
        }
    }
}
