//! Domain model for a transaction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Storage representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Parse the storage representation back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Opaque identifier of the owning user
    pub user_id: String,
    /// Weak reference to a contact; lookup only, no ownership
    pub contact_id: Option<String>,
    /// Description of the transaction (max 256 characters)
    pub description: String,
    /// Always positive; direction is carried by `kind`
    pub amount: f64,
    pub launch_date: NaiveDate,
    pub due_date: NaiveDate,
    pub kind: TransactionKind,
    pub is_paid: bool,
    /// Present iff `is_paid` is true
    pub paid_date: Option<NaiveDate>,
    /// True only for transactions produced by the recurring-charge generator
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Generate a unique transaction ID based on kind and current timestamp.
    /// Format: tx::<income|expense>::<timestamp_ms>::<random_suffix>
    pub fn generate_id(kind: TransactionKind, timestamp_ms: u64) -> String {
        let suffix = Self::generate_random_suffix(4);
        format!("tx::{}::{}::{}", kind.as_str(), timestamp_ms, suffix)
    }

    /// Current time in epoch milliseconds, for ID generation.
    pub fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Generate a random hex suffix for transaction IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        format!("{:0len$x}", now % (16_u128.pow(len as u32)), len = len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = Transaction::generate_id(TransactionKind::Income, 1625846400123);
        let parts: Vec<&str> = id.split("::").collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "tx");
        assert_eq!(parts[1], "income");
        assert_eq!(parts[2], "1625846400123");
        assert_eq!(parts[3].len(), 4);
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(
            TransactionKind::parse(TransactionKind::Income.as_str()),
            Some(TransactionKind::Income)
        );
        assert_eq!(
            TransactionKind::parse(TransactionKind::Expense.as_str()),
            Some(TransactionKind::Expense)
        );
        assert_eq!(TransactionKind::parse("transfer"), None);
    }
}
