//! Enum types for dealflow records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record kind discriminator, used in errors and store diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Deal,
    Lead,
    Contact,
    Account,
    Stage,
}

/// Deal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Qualification status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Unqualified,
}

/// Acquisition channel of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadSource {
    Website,
    Social,
    Referral,
    Campaign,
    TradeShow,
}

/// Relationship health of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountHealth {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

fn normalize_token(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid Priority: {}", s)),
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Unqualified => "unqualified",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "qualified" => Ok(LeadStatus::Qualified),
            "unqualified" => Ok(LeadStatus::Unqualified),
            _ => Err(format!("Invalid LeadStatus: {}", s)),
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            LeadSource::Website => "website",
            LeadSource::Social => "social",
            LeadSource::Referral => "referral",
            LeadSource::Campaign => "campaign",
            LeadSource::TradeShow => "trade-show",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "website" => Ok(LeadSource::Website),
            "social" => Ok(LeadSource::Social),
            "referral" => Ok(LeadSource::Referral),
            "campaign" => Ok(LeadSource::Campaign),
            "trade-show" | "tradeshow" => Ok(LeadSource::TradeShow),
            _ => Err(format!("Invalid LeadSource: {}", s)),
        }
    }
}

impl fmt::Display for AccountHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AccountHealth::Excellent => "excellent",
            AccountHealth::Good => "good",
            AccountHealth::Fair => "fair",
            AccountHealth::Poor => "poor",
            AccountHealth::Critical => "critical",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for AccountHealth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "excellent" => Ok(AccountHealth::Excellent),
            "good" => Ok(AccountHealth::Good),
            "fair" => Ok(AccountHealth::Fair),
            "poor" => Ok(AccountHealth::Poor),
            "critical" => Ok(AccountHealth::Critical),
            _ => Err(format!("Invalid AccountHealth: {}", s)),
        }
    }
}
