//! Account balance model (`/api/balance`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Validate, non_negative};

/// Point-in-time snapshot of the account balances.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Balance {
    /// Available for withdrawal.
    pub balance: Decimal,
    /// Earned through the referral programme.
    pub referral: Decimal,
    /// Held and not yet available.
    pub hold: Decimal,
}

impl Validate for Balance {
    fn validate(&self) -> crate::Result<()> {
        non_negative("balance", self.balance)?;
        non_negative("referral", self.referral)?;
        non_negative("hold", self.hold)
    }
}
