//! Domain model for a contact (company or individual client).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of contact, used for filtering in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Company,
    Client,
}

impl ContactKind {
    /// Storage representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Company => "company",
            ContactKind::Client => "client",
        }
    }

    /// Parse the storage representation back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "company" => Some(ContactKind::Company),
            "client" => Some(ContactKind::Client),
            _ => None,
        }
    }
}

/// Monthly billing rule attached to a contact.
///
/// Absent, partially populated and switched-off configurations all collapse to
/// `Inactive`; an `Active` value always carries a complete rule. Field ranges
/// are enforced by the contact service at write time, so an `Active` value
/// read back from storage is always well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecurringCharge {
    Inactive,
    Active {
        /// Monthly amount charged to the contact (positive)
        amount: f64,
        /// Day-of-month the transaction is launched (1-31)
        launch_day: u32,
        /// Day-of-month the payment is due (1-31)
        due_day: u32,
    },
}

impl RecurringCharge {
    pub fn is_active(&self) -> bool {
        matches!(self, RecurringCharge::Active { .. })
    }
}

/// Domain model representing a contact owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    /// Opaque identifier of the owning user
    pub user_id: String,
    pub name: String,
    pub kind: ContactKind,
    pub email: Option<String>,
    pub recurring_charge: RecurringCharge,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Generate a unique ID for a contact
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
