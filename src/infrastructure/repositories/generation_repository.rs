use async_trait::async_trait;

use crate::domain::impression::{GeneratedImpression, ImpressionFormat};

/// Collaborator that turns clinical findings into an impression section.
/// Abstracts the underlying language-model provider.
///
/// Implementations are responsible for:
/// - Building the format-specific prompt
/// - Provider-specific request parameters (temperature, token budget)
/// - Reporting token counts alongside the generated text
///
/// Failures are opaque to callers: the error string is logged and surfaced
/// as "generation failed", never interpreted further.
#[async_trait]
pub trait GenerationRepository: Send + Sync {
    async fn generate(
        &self,
        findings: &str,
        format: ImpressionFormat,
    ) -> Result<GeneratedImpression, String>;
}
