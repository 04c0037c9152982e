//! Withdrawal (payoff) models: `/api/create-payoff`, `/api/info-payoff`
//! and `/api/methods-payoff`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CommissionType, ExternalId, Validate, non_negative};

/// Parameters for a new withdrawal.
#[derive(Debug, Clone)]
pub struct WithdrawalRequest {
    my_id: ExternalId,
    method: String,
    amount: Decimal,
    wallet: String,
    commission_type: CommissionType,
}

impl WithdrawalRequest {
    /// Creates a withdrawal request with the commission taken from `amount`.
    ///
    /// # Arguments
    ///
    /// * `my_id` - Withdrawal identifier in the caller's system
    /// * `method` - Payoff method code (see `withdrawal_methods`)
    /// * `amount` - Amount to withdraw
    /// * `wallet` - Destination wallet or number, without `+`, spaces or separators
    #[must_use]
    pub fn new(
        my_id: impl Into<ExternalId>,
        method: &str,
        amount: Decimal,
        wallet: &str,
    ) -> Self {
        Self {
            my_id: my_id.into(),
            method: method.to_string(),
            amount,
            wallet: wallet.to_string(),
            commission_type: CommissionType::default(),
        }
    }

    /// Sets how the commission is charged.
    #[must_use]
    pub fn with_commission_type(mut self, commission_type: CommissionType) -> Self {
        self.commission_type = commission_type;
        self
    }

    /// Returns the caller's withdrawal identifier.
    #[must_use]
    pub fn my_id(&self) -> &ExternalId {
        &self.my_id
    }

    /// Returns the form parameters sent to `/api/create-payoff`.
    pub(crate) fn params(&self) -> crate::params::Params {
        crate::params::Params::new()
            .with("my_id", &self.my_id)
            .with("method", &self.method)
            .with("amount", self.amount)
            .with("wallet", &self.wallet)
            .with("commission_type", self.commission_type.as_u8())
    }
}

/// Result of creating a withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Withdrawal {
    /// aaio-side withdrawal identifier (UUID).
    pub id: String,
    pub my_id: ExternalId,
    pub method: String,
    pub wallet: String,
    /// Requested amount.
    pub amount: Decimal,
    /// Amount that reaches the wallet after commission.
    pub amount_down: Decimal,
    pub commission: Decimal,
    pub commission_type: CommissionType,
    pub status: String,
}

impl Validate for Withdrawal {
    fn validate(&self) -> crate::Result<()> {
        non_negative("amount", self.amount)?;
        non_negative("amount_down", self.amount_down)?;
        non_negative("commission", self.commission)
    }
}

/// Current state of a withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WithdrawalInfo {
    pub id: String,
    pub my_id: ExternalId,
    pub method: String,
    pub wallet: String,
    pub amount: Decimal,
    pub amount_down: Decimal,
    pub commission: Decimal,
    pub commission_type: CommissionType,
    /// Status as reported by aaio (`in_process`, `success`, `cancel`, ...).
    pub status: String,
    /// Reason given when the withdrawal was cancelled.
    #[serde(default)]
    pub cancel_message: Option<String>,
    pub date: String,
    #[serde(default)]
    pub complete_date: Option<String>,
}

impl Validate for WithdrawalInfo {
    fn validate(&self) -> crate::Result<()> {
        non_negative("amount", self.amount)?;
        non_negative("amount_down", self.amount_down)?;
        non_negative("commission", self.commission)
    }
}

/// Limits and commission of a payoff method.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WithdrawalMethodInfo {
    pub min: Decimal,
    pub max: Decimal,
    pub commission_percent: Decimal,
    /// Fixed commission added to the percentage.
    pub commission_sum: Decimal,
}

impl Validate for WithdrawalMethodInfo {
    fn validate(&self) -> crate::Result<()> {
        non_negative("min", self.min)?;
        non_negative("max", self.max)?;
        non_negative("commission_percent", self.commission_percent)?;
        non_negative("commission_sum", self.commission_sum)
    }
}
