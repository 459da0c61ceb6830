pub mod model;
pub mod service;

pub use model::UsageRecord;
pub use service::{DenyReason, EntitlementDecision, LedgerService};
