//! Audit records persisted in the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account_id::AccountId;

/// Collection holding [`StatusCheck`] documents.
pub const STATUS_CHECKS: &str = "status_checks";

/// Collection holding [`TransactionRecord`] documents.
pub const TRANSACTIONS: &str = "transactions";

/// Maximum number of records returned by a list call.
pub const LIST_LIMIT: usize = 1000;

/// A client check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Kind of a recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
}

/// Processing state of a recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Recorded,
}

/// A deposit-style entry reported by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub account_id: AccountId,
    pub amount: String,
    pub asset_code: String,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionCreate {
    pub account_id: String,
    pub amount: String,
    pub asset_code: Option<String>,
    pub tx_hash: Option<String>,
    pub memo: Option<String>,
}

impl TransactionRecord {
    /// Build a deposit record. `default_asset` is used when the request
    /// names no asset.
    pub fn deposit(account_id: AccountId, request: TransactionCreate, default_asset: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id,
            amount: request.amount.trim().to_string(),
            asset_code: request
                .asset_code
                .filter(|code| !code.trim().is_empty())
                .unwrap_or_else(|| default_asset.to_string()),
            transaction_type: TransactionType::Deposit,
            status: TransactionStatus::Recorded,
            tx_hash: request.tx_hash,
            memo: request.memo,
            timestamp: Utc::now(),
        }
    }
}

/// Whether `amount` is a finite, non-negative decimal.
pub fn is_valid_amount(amount: &str) -> bool {
    amount
        .trim()
        .parse::<f64>()
        .map(|value| value.is_finite() && value >= 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    #[test]
    fn test_status_check_ids_unique() {
        let a = StatusCheck::new("bot");
        let b = StatusCheck::new("bot");
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_deposit_defaults_asset() {
        let request = TransactionCreate {
            account_id: ACCOUNT.to_string(),
            amount: " 12.5 ".to_string(),
            asset_code: None,
            tx_hash: Some("abc".to_string()),
            memo: None,
        };
        let record = TransactionRecord::deposit(ACCOUNT.parse().unwrap(), request, "WLX");
        assert_eq!(record.asset_code, "WLX");
        assert_eq!(record.amount, "12.5");
        assert_eq!(record.transaction_type, TransactionType::Deposit);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["transaction_type"], "deposit");
        assert_eq!(json["status"], "recorded");
        assert_eq!(json["account_id"], ACCOUNT);
        assert!(json.get("memo").is_none());
    }

    #[test]
    fn test_amount_validation() {
        assert!(is_valid_amount("0"));
        assert!(is_valid_amount("1500.0000000"));
        assert!(!is_valid_amount("-1"));
        assert!(!is_valid_amount("abc"));
        assert!(!is_valid_amount("NaN"));
        assert!(!is_valid_amount("inf"));
        assert!(!is_valid_amount(""));
    }
}
