use regex::Regex;
use std::sync::Arc;

use super::error::AdminServiceError;
use crate::domain::ledger::{LedgerService, UsageRecord};
use crate::domain::plan::Plan;

/// Emails at these domains are seed/demo accounts, hidden from the default
/// admin listing
const SEED_DOMAIN_PATTERN: &str = r"(?i)@(example\.com|test\.com)$";

/// Out-of-band mutations on ledger records, gated by an email allow-list.
///
/// The allow-list is injected from configuration; a non-admin caller gets
/// a forbidden error and no mutation is performed.
pub struct AdminService {
    ledger: Arc<LedgerService>,
    admin_emails: Vec<String>,
    seed_pattern: Regex,
}

impl AdminService {
    pub fn new(ledger: Arc<LedgerService>, admin_emails: Vec<String>) -> Self {
        let admin_emails = admin_emails
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        // The pattern is a checked constant
        let seed_pattern = Regex::new(SEED_DOMAIN_PATTERN).unwrap();
        Self {
            ledger,
            admin_emails,
            seed_pattern,
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.admin_emails.contains(&email.trim().to_lowercase())
    }

    fn require_admin(&self, email: &str) -> Result<(), AdminServiceError> {
        if self.is_admin(email) {
            Ok(())
        } else {
            tracing::warn!(email = %email, "Admin access denied");
            Err(AdminServiceError::Forbidden)
        }
    }

    /// All ledger records, most recently used first. Seed accounts are
    /// filtered out unless explicitly requested.
    pub async fn list_users(
        &self,
        admin_email: &str,
        include_seed: bool,
    ) -> Result<Vec<UsageRecord>, AdminServiceError> {
        self.require_admin(admin_email)?;
        let users = self.ledger.all().await?;

        if include_seed {
            return Ok(users);
        }
        Ok(users
            .into_iter()
            .filter(|user| !self.seed_pattern.is_match(&user.email))
            .collect())
    }

    pub async fn set_blocked(
        &self,
        admin_email: &str,
        user_id: &str,
        blocked: bool,
    ) -> Result<(), AdminServiceError> {
        self.require_admin(admin_email)?;
        self.ledger.set_blocked(user_id, blocked).await?;
        tracing::info!(
            admin = %admin_email,
            user_id = %user_id,
            blocked,
            "Admin changed block state"
        );
        Ok(())
    }

    pub async fn reset_usage(
        &self,
        admin_email: &str,
        user_id: &str,
    ) -> Result<(), AdminServiceError> {
        self.require_admin(admin_email)?;
        self.ledger.reset_usage(user_id).await?;
        tracing::info!(admin = %admin_email, user_id = %user_id, "Admin reset usage");
        Ok(())
    }

    /// Change the plan. Counters are not reset here; an admin who wants the
    /// new tier to start clean calls `reset_usage` as a second step.
    pub async fn change_plan(
        &self,
        admin_email: &str,
        user_id: &str,
        plan: Plan,
    ) -> Result<(), AdminServiceError> {
        self.require_admin(admin_email)?;
        self.ledger.set_plan(user_id, plan).await?;
        tracing::info!(
            admin = %admin_email,
            user_id = %user_id,
            plan = %plan,
            "Admin changed plan"
        );
        Ok(())
    }
}
