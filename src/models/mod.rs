//! Typed records for aaio API responses and the shared value types they use.
//!
//! Every response is a JSON object carrying a `type` discriminator (and a
//! `message` on failure). [`decode`] strips that envelope and maps the rest
//! onto a record; records reject unknown fields so a changed response shape
//! surfaces as [`AaioError::Validation`] instead of being silently dropped.

pub mod balance;
pub mod order;
pub mod payment_link;
pub mod withdrawal;

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AaioError;

pub use balance::Balance;
pub use order::{CurrencyBounds, Order, OrderMethodInfo};
pub use payment_link::PaymentLink;
pub use withdrawal::{Withdrawal, WithdrawalInfo, WithdrawalMethodInfo, WithdrawalRequest};

/// Envelope keys removed before a payload is mapped onto a record.
const ENVELOPE_KEYS: [&str; 2] = ["type", "message"];

/// Currencies accepted by aaio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Uah,
    Eur,
    Usd,
}

impl Currency {
    /// Returns the wire-format currency code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Uah => "UAH",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment page interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    En,
}

impl Language {
    /// Returns the wire-format language code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

/// How the withdrawal commission is charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CommissionType {
    /// Commission is deducted from the requested amount (wire value `0`).
    #[default]
    FromAmount,
    /// Commission is charged on top of the requested amount (wire value `1`).
    OnTop,
}

impl CommissionType {
    /// Returns the wire-format value.
    pub fn as_u8(self) -> u8 {
        match self {
            CommissionType::FromAmount => 0,
            CommissionType::OnTop => 1,
        }
    }
}

impl From<CommissionType> for u8 {
    fn from(value: CommissionType) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for CommissionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CommissionType::FromAmount),
            1 => Ok(CommissionType::OnTop),
            other => Err(format!("unknown commission type {other}")),
        }
    }
}

/// A caller-chosen identifier (order ID, withdrawal `my_id`).
///
/// The API accepts and echoes these as either strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalId::Int(n) => write!(f, "{n}"),
            ExternalId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ExternalId {
    fn from(value: &str) -> Self {
        ExternalId::Text(value.to_string())
    }
}

impl From<String> for ExternalId {
    fn from(value: String) -> Self {
        ExternalId::Text(value)
    }
}

impl From<i64> for ExternalId {
    fn from(value: i64) -> Self {
        ExternalId::Int(value)
    }
}

impl From<i32> for ExternalId {
    fn from(value: i32) -> Self {
        ExternalId::Int(value.into())
    }
}

impl From<u32> for ExternalId {
    fn from(value: u32) -> Self {
        ExternalId::Int(value.into())
    }
}

/// Post-deserialization invariant checks.
pub trait Validate {
    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Validation`] naming the offending field.
    fn validate(&self) -> crate::Result<()>;
}

/// Fails if an amount is negative.
pub(crate) fn non_negative(field: &str, value: Decimal) -> crate::Result<()> {
    if value < Decimal::ZERO {
        return Err(AaioError::Validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Like [`non_negative`] for optional amounts.
pub(crate) fn non_negative_opt(field: &str, value: Option<Decimal>) -> crate::Result<()> {
    value.map_or(Ok(()), |v| non_negative(field, v))
}

/// The `list` object returned by the method-listing endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, bound(deserialize = "T: DeserializeOwned"))]
pub struct MethodList<T> {
    #[serde(deserialize_with = "method_map")]
    pub list: BTreeMap<String, T>,
}

/// Accepts `[]` as an empty map, which is how the API encodes "no methods".
fn method_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) if items.is_empty() => Ok(BTreeMap::new()),
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

impl<T: Validate> Validate for MethodList<T> {
    fn validate(&self) -> crate::Result<()> {
        self.list.iter().try_for_each(|(name, info)| {
            info.validate()
                .map_err(|e| AaioError::Validation(format!("method {name}: {e}")))
        })
    }
}

/// Maps a success payload onto a record, dropping the envelope keys first.
///
/// # Errors
///
/// Returns [`AaioError::Validation`] if the remaining fields do not match
/// `T` exactly or an invariant check fails.
pub fn decode<T>(mut payload: Map<String, Value>) -> crate::Result<T>
where
    T: DeserializeOwned + Validate,
{
    for key in ENVELOPE_KEYS {
        payload.remove(key);
    }

    let record: T = serde_json::from_value(Value::Object(payload))
        .map_err(|e| AaioError::Validation(e.to_string()))?;
    record.validate()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_method_array_is_empty_map() {
        let payload = object(json!({"type": "success", "list": []}));

        let methods: MethodList<WithdrawalMethodInfo> = decode(payload).unwrap();
        assert!(methods.list.is_empty());
    }

    #[test]
    fn non_empty_method_array_is_rejected() {
        let payload = object(json!({"type": "success", "list": [{"min": 1}]}));

        let err = decode::<MethodList<WithdrawalMethodInfo>>(payload).unwrap_err();
        assert!(matches!(err, AaioError::Validation(_)));
    }

    #[test]
    fn decode_strips_envelope() {
        let payload = object(json!({
            "type": "success",
            "balance": 10.5,
            "referral": 0,
            "hold": "1.25"
        }));

        let balance: Balance = decode(payload).unwrap();
        assert_eq!(balance.balance, dec!(10.5));
        assert_eq!(balance.referral, dec!(0));
        assert_eq!(balance.hold, dec!(1.25));
    }

    #[test]
    fn decode_rejects_unknown_fields() {
        let payload = object(json!({
            "type": "success",
            "balance": 1,
            "referral": 0,
            "hold": 0,
            "bonus": 5
        }));

        let err = decode::<Balance>(payload).unwrap_err();
        assert!(matches!(err, AaioError::Validation(_)));
        assert!(err.to_string().contains("bonus"));
    }

    #[test]
    fn decode_rejects_missing_fields() {
        let payload = object(json!({ "type": "success", "balance": 1, "hold": 0 }));

        let err = decode::<Balance>(payload).unwrap_err();
        assert!(err.to_string().contains("referral"));
    }

    #[test]
    fn decode_rejects_negative_amounts() {
        let payload = object(json!({
            "type": "success",
            "balance": -1,
            "referral": 0,
            "hold": 0
        }));

        let err = decode::<Balance>(payload).unwrap_err();
        assert!(err.to_string().contains("balance must be non-negative"));
    }

    #[test]
    fn external_id_accepts_text_and_integers() {
        let text: ExternalId = serde_json::from_value(json!("A-17")).unwrap();
        let int: ExternalId = serde_json::from_value(json!(17)).unwrap();

        assert_eq!(text, ExternalId::from("A-17"));
        assert_eq!(int, ExternalId::from(17_i64));
        assert_eq!(int.to_string(), "17");
    }

    #[test]
    fn commission_type_wire_values() {
        assert_eq!(CommissionType::default(), CommissionType::FromAmount);
        assert_eq!(CommissionType::OnTop.as_u8(), 1);
        assert!(serde_json::from_value::<CommissionType>(json!(2)).is_err());
        assert_eq!(
            serde_json::from_value::<CommissionType>(json!(0)).unwrap(),
            CommissionType::FromAmount
        );
    }

    #[test]
    fn currency_codes() {
        assert_eq!(Currency::default(), Currency::Rub);
        assert_eq!(Currency::Uah.to_string(), "UAH");
        assert_eq!(
            serde_json::from_value::<Currency>(json!("EUR")).unwrap(),
            Currency::Eur
        );
        assert!(serde_json::from_value::<Currency>(json!("GBP")).is_err());
    }
}
