use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;

use crate::{ChatMessage, ChatRole, CompletionRequest, CompletionService};

pub struct OpenAICompletionService {
    client: Client<OpenAIConfig>,
}

impl OpenAICompletionService {
    pub fn new(api_key: String, org_id: Option<String>, api_base: Option<String>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(org_id) = org_id {
            config = config.with_org_id(org_id);
        }
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }
        // A rate-limited or failed call is reported to the caller, never re-sent.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(config).with_backoff(no_retry);

        Self { client }
    }
}

fn to_openai_message(message: &ChatMessage) -> ChatCompletionRequestMessage {
    match message.role {
        ChatRole::System => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: message.content.clone().into(),
                name: None,
            })
        }
        ChatRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: message.content.clone().into(),
            name: None,
        }),
    }
}

fn build_chat_request(request: &CompletionRequest) -> Result<CreateChatCompletionRequest> {
    let messages: Vec<ChatCompletionRequestMessage> =
        request.messages.iter().map(to_openai_message).collect();

    CreateChatCompletionRequestArgs::default()
        .model(request.model.as_str())
        .messages(messages)
        .temperature(request.temperature)
        .max_completion_tokens(request.max_tokens)
        .build()
        .context("Failed to build chat completion request")
}

#[async_trait]
impl CompletionService for OpenAICompletionService {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let chat_request = build_chat_request(&request)?;

        tracing::debug!(model = %request.model, "sending chat completion request");
        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .context("OpenAI API request failed")?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("No content in OpenAI response")
    }
}
