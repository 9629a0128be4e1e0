use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff/customer role of an identity.
///
/// One identity record carries one role tag plus that role's attributes.
/// Role-specific behavior in the wider POS dispatches on this tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    Customer {
        /// Table the customer is currently seated at, if any.
        table_id: Option<Uuid>,
    },
    Waiter {
        birth_date: Option<NaiveDate>,
    },
    Kitchen {
        /// Kitchen station assignment, e.g. "grill".
        station: Option<String>,
    },
    Admin,
}

impl Role {
    /// Stable tag used as the persistence discriminator.
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Customer { .. } => "customer",
            Role::Waiter { .. } => "waiter",
            Role::Kitchen { .. } => "kitchen",
            Role::Admin => "admin",
        }
    }

    pub fn customer() -> Self {
        Role::Customer { table_id: None }
    }
}
