pub mod dto;
pub mod error;
pub mod model;
pub mod pricing;
pub mod service;

pub use dto::{GenerateImpressionRequest, GenerateImpressionResponse, HistoryResponse};
pub use error::ImpressionServiceError;
pub use model::{GeneratedImpression, HistoryEntry, ImpressionFormat, TokenUsage};
pub use service::{ImpressionResult, ImpressionService};
