use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use super::error::ImpressionServiceError;
use super::model::{HistoryEntry, ImpressionFormat, TokenUsage};
use super::pricing;
use crate::domain::ledger::{DenyReason, EntitlementDecision, LedgerService};
use crate::domain::shared::UsageResponse;
use crate::infrastructure::repositories::{GenerationRepository, HistoryRepository};

/// Result of one successful generation
#[derive(Debug, Clone)]
pub struct ImpressionResult {
    pub impression: String,
    pub token_usage: TokenUsage,
}

/// Orchestrates the generation flow: entitlement check, model call,
/// usage charge, history append.
pub struct ImpressionService {
    ledger: Arc<LedgerService>,
    generation_repo: Arc<dyn GenerationRepository>,
    history_repo: Arc<dyn HistoryRepository>,
    generation_timeout: Duration,
}

impl ImpressionService {
    pub fn new(
        ledger: Arc<LedgerService>,
        generation_repo: Arc<dyn GenerationRepository>,
        history_repo: Arc<dyn HistoryRepository>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            ledger,
            generation_repo,
            history_repo,
            generation_timeout,
        }
    }

    /// Generate an impression for the caller.
    ///
    /// The ledger is only charged after a confirmed successful response from
    /// the generation collaborator; a timeout or upstream error leaves the
    /// ledger untouched, so a retry never double-charges.
    pub async fn generate(
        &self,
        user_id: &str,
        email: &str,
        display_name: &str,
        findings: &str,
        format: ImpressionFormat,
    ) -> Result<ImpressionResult, ImpressionServiceError> {
        if findings.trim().is_empty() {
            return Err(ImpressionServiceError::Invalid(
                "Findings are required".to_string(),
            ));
        }

        tracing::info!(
            user_id = %user_id,
            email = %email,
            format = %format,
            findings_length = findings.len(),
            "Impression generation request"
        );

        self.ledger.ensure(user_id, email, display_name).await?;

        match self.ledger.evaluate_and_maybe_block(user_id).await? {
            EntitlementDecision::Allowed => {}
            EntitlementDecision::Denied(DenyReason::Blocked) => {
                return Err(ImpressionServiceError::Blocked);
            }
            EntitlementDecision::Denied(DenyReason::QuotaExceeded { used, limit }) => {
                return Err(ImpressionServiceError::QuotaExceeded { used, limit });
            }
        }

        let generated = timeout(
            self.generation_timeout,
            self.generation_repo.generate(findings, format),
        )
        .await
        .map_err(|_| ImpressionServiceError::Upstream("generation timed out".to_string()))?
        .map_err(ImpressionServiceError::Upstream)?;

        let cost = pricing::cost_for(
            &generated.model,
            generated.prompt_tokens,
            generated.completion_tokens,
        );
        let token_usage = TokenUsage {
            prompt_tokens: generated.prompt_tokens,
            completion_tokens: generated.completion_tokens,
            total_tokens: generated.total_tokens,
            cost,
            model: generated.model.clone(),
            format,
        };

        self.ledger
            .record_usage(user_id, generated.total_tokens, cost)
            .await?;

        self.history_repo
            .append(HistoryEntry::new(
                user_id,
                findings,
                &generated.text,
                token_usage.clone(),
            ))
            .await?;

        tracing::info!(
            user_id = %user_id,
            model = %generated.model,
            total_tokens = generated.total_tokens,
            cost = format!("{:.4}", cost),
            "Generation successful"
        );

        Ok(ImpressionResult {
            impression: generated.text,
            token_usage,
        })
    }

    /// Usage snapshot for the caller; absent records read as zero usage on
    /// the free plan
    pub async fn get_usage(&self, user_id: &str) -> Result<UsageResponse, ImpressionServiceError> {
        let record = self.ledger.get(user_id).await?;

        let (tokens_used, impressions, plan, blocked) = match &record {
            Some(record) => (
                record.total_tokens_used,
                record.total_impressions,
                record.plan,
                record.is_blocked,
            ),
            None => (0, 0, Default::default(), false),
        };

        // Daily counters roll over at midnight UTC
        let tomorrow = Utc::now() + ChronoDuration::days(1);
        let resets_at = tomorrow
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        Ok(UsageResponse {
            tokens_used,
            tokens_limit: plan.token_limit(),
            impressions_generated: impressions,
            plan,
            blocked,
            resets_at,
        })
    }

    /// Past generations for the caller, newest first
    pub async fn get_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<HistoryEntry>, ImpressionServiceError> {
        Ok(self.history_repo.list_for(user_id).await?)
    }
}
