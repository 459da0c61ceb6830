use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

use super::generation_repository::GenerationRepository;
use crate::domain::impression::{GeneratedImpression, ImpressionFormat};

/// Low temperature for consistent clinical phrasing
const TEMPERATURE: f32 = 0.1;

/// OpenAI chat-completions implementation of the generation collaborator
pub struct OpenAiGenerationRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiGenerationRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl GenerationRepository for OpenAiGenerationRepository {
    async fn generate(
        &self,
        findings: &str,
        format: ImpressionFormat,
    ) -> Result<GeneratedImpression, String> {
        let start_time = std::time::Instant::now();
        let user_prompt = format!("FINDINGS:\n{}\n\nIMPRESSION:", findings);

        tracing::info!(
            model = %self.model,
            format = %format,
            findings_length = findings.len(),
            "Calling OpenAI chat completions API"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(format.system_prompt())
                    .build()
                    .map_err(|e| format!("OpenAI request build error: {}", e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()
                    .map_err(|e| format!("OpenAI request build error: {}", e))?
                    .into(),
            ])
            .max_tokens(format.max_tokens())
            .temperature(TEMPERATURE)
            .build()
            .map_err(|e| format!("OpenAI request build error: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                format = %format,
                "OpenAI chat completions call failed"
            );
            format!("OpenAI error: {}", e)
        })?;

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| "No impression generated".to_string())?
            .to_string();

        let usage = response.usage.as_ref();
        let prompt_tokens = usage.map(|u| u.prompt_tokens as i64).unwrap_or(0);
        let completion_tokens = usage.map(|u| u.completion_tokens as i64).unwrap_or(0);
        let total_tokens = usage.map(|u| u.total_tokens as i64).unwrap_or(0);

        tracing::info!(
            model = %self.model,
            format = %format,
            latency_ms = start_time.elapsed().as_millis(),
            prompt_tokens,
            completion_tokens,
            total_tokens,
            impression_length = text.len(),
            "Impression generated"
        );

        Ok(GeneratedImpression {
            text,
            model: self.model.clone(),
            prompt_tokens,
            completion_tokens,
            total_tokens,
        })
    }
}
