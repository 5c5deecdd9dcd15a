use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
    Frozen,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Frozen => "frozen",
        };
        write!(f, "{}", status)
    }
}

impl SubscriptionStatus {
    /// Unknown strings map to `Expired` so they can never enter the due set.
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => SubscriptionStatus::Active,
            "expired" => SubscriptionStatus::Expired,
            "cancelled" => SubscriptionStatus::Cancelled,
            "frozen" => SubscriptionStatus::Frozen,
            _ => SubscriptionStatus::Expired,
        }
    }

    pub const ALL: [SubscriptionStatus; 4] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Expired,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::Frozen,
    ];
}
