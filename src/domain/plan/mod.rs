use serde::{Deserialize, Serialize};

/// Subscription plan determining a user's token quota.
///
/// Unknown plan strings always decode to `Free` so that reads stay total:
/// a corrupted or legacy plan value never makes a record unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    #[default]
    Free,
    Basic,
    Pro,
    RadPlus,
}

impl Plan {
    /// Token quota for this plan
    pub fn token_limit(&self) -> i64 {
        match self {
            Plan::Free => 10_000,
            Plan::Basic => 50_000,
            Plan::Pro => 200_000,
            Plan::RadPlus => 1_000_000,
        }
    }

    /// Parse a stored plan string, falling back to `Free` for unknown values
    pub fn parse_or_free(value: &str) -> Self {
        match value {
            "free" => Plan::Free,
            "basic" => Plan::Basic,
            "pro" => Plan::Pro,
            "rad-plus" => Plan::RadPlus,
            _ => Plan::Free,
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Basic => write!(f, "basic"),
            Plan::Pro => write!(f, "pro"),
            Plan::RadPlus => write!(f, "rad-plus"),
        }
    }
}
