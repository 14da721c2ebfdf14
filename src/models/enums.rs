//! Shared domain enums, stored as Postgres enum types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Workflow status of an active loan request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

impl LoanStatus {
    /// Parse a wire value; `None` for anything outside the status domain.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(LoanStatus::Pending),
            "approved" => Some(LoanStatus::Approved),
            "rejected" => Some(LoanStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FinalStatus (status_akhir)
// ---------------------------------------------------------------------------

/// Final status recorded when a loan is archived into history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_akhir", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FinalStatus {
    /// Completed ("selesai")
    Selesai,
    /// Cancelled ("dibatalkan")
    Dibatalkan,
}

impl FinalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalStatus::Selesai => "selesai",
            FinalStatus::Dibatalkan => "dibatalkan",
        }
    }
}

impl std::fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReturnCondition (kondisi_kembali)
// ---------------------------------------------------------------------------

/// Condition of the item when returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "kondisi_kembali", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReturnCondition {
    /// Good ("baik")
    Baik,
    /// Light damage ("rusak_ringan")
    RusakRingan,
    /// Heavy damage ("rusak_berat")
    RusakBerat,
}

impl ReturnCondition {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "baik" => Some(ReturnCondition::Baik),
            "rusak_ringan" => Some(ReturnCondition::RusakRingan),
            "rusak_berat" => Some(ReturnCondition::RusakBerat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnCondition::Baik => "baik",
            ReturnCondition::RusakRingan => "rusak_ringan",
            ReturnCondition::RusakBerat => "rusak_berat",
        }
    }
}

impl std::fmt::Display for ReturnCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_status_parse_accepts_only_the_three_states() {
        assert_eq!(LoanStatus::parse("pending"), Some(LoanStatus::Pending));
        assert_eq!(LoanStatus::parse("approved"), Some(LoanStatus::Approved));
        assert_eq!(LoanStatus::parse("rejected"), Some(LoanStatus::Rejected));
        assert_eq!(LoanStatus::parse("selesai"), None);
        assert_eq!(LoanStatus::parse("PENDING"), None);
        assert_eq!(LoanStatus::parse(""), None);
    }

    #[test]
    fn return_condition_parse_round_trips() {
        for c in [
            ReturnCondition::Baik,
            ReturnCondition::RusakRingan,
            ReturnCondition::RusakBerat,
        ] {
            assert_eq!(ReturnCondition::parse(c.as_str()), Some(c));
        }
        assert_eq!(ReturnCondition::parse("hancur"), None);
    }
}
