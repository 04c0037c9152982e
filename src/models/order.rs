//! Order models (`/api/info-pay`, `/api/methods-pay`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, ExternalId, Validate, non_negative, non_negative_opt};

/// Snapshot of an order created when a payer opened a payment link.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Order {
    /// aaio-side order identifier (UUID).
    pub id: String,
    /// Order identifier in the merchant's system.
    pub order_id: ExternalId,
    pub merchant_id: String,
    pub merchant_domain: String,
    /// Payment method chosen by the payer, once chosen.
    #[serde(default)]
    pub method: Option<String>,
    pub amount: Decimal,
    pub currency: Currency,
    /// Amount credited to the merchant after commission.
    #[serde(default)]
    pub profit: Option<Decimal>,
    /// Commission charged to the merchant.
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Commission charged to the payer.
    #[serde(default)]
    pub commission_client: Option<Decimal>,
    pub commission_type: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Order status as reported by aaio (`in_process`, `success`, `expired`, ...).
    pub status: String,
    /// Creation time.
    pub date: String,
    pub expired_date: String,
    #[serde(default)]
    pub complete_date: Option<String>,
    /// Custom `us_*` variables passed with the payment link.
    pub us_vars: Vec<serde_json::Value>,
}

impl Validate for Order {
    fn validate(&self) -> crate::Result<()> {
        non_negative("amount", self.amount)?;
        non_negative_opt("profit", self.profit)?;
        non_negative_opt("commission", self.commission)?;
        non_negative_opt("commission_client", self.commission_client)
    }
}

/// A bound expressed in each of the four supported currencies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencyBounds {
    #[serde(rename = "RUB")]
    pub rub: Decimal,
    #[serde(rename = "UAH")]
    pub uah: Decimal,
    #[serde(rename = "USD")]
    pub usd: Decimal,
    #[serde(rename = "EUR")]
    pub eur: Decimal,
}

impl CurrencyBounds {
    /// Returns the bound for `currency`.
    #[must_use]
    pub fn get(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Rub => self.rub,
            Currency::Uah => self.uah,
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
        }
    }

    fn validate(&self, field: &str) -> crate::Result<()> {
        for currency in [Currency::Rub, Currency::Uah, Currency::Usd, Currency::Eur] {
            non_negative(&format!("{field}.{currency}"), self.get(currency))?;
        }
        Ok(())
    }
}

/// Limits and commission of a payment method.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrderMethodInfo {
    pub min: CurrencyBounds,
    pub max: CurrencyBounds,
    pub commission_percent: Decimal,
}

impl Validate for OrderMethodInfo {
    fn validate(&self) -> crate::Result<()> {
        self.min.validate("min")?;
        self.max.validate("max")?;
        non_negative("commission_percent", self.commission_percent)
    }
}
