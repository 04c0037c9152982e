//! Payment link parameters (`/merchant/pay`).
//!
//! A payment link is built locally: the merchant hands the URL to a payer,
//! and aaio creates the order when the payer opens it. The link is signed
//! with secret key #1, see [`crate::auth::sign`].
//!
//! # Example
//!
//! ```ignore
//! let link = PaymentLink::new(dec!(250), "order-17")
//!     .with_currency(Currency::Usd)
//!     .with_language(Language::En);
//! let url = client.generate_payment_url(&link)?;
//! ```

use rust_decimal::Decimal;

use super::{Currency, ExternalId, Language};
use crate::params::Params;

/// Builder for the parameters of a payment link.
#[derive(Debug, Clone)]
pub struct PaymentLink {
    amount: Decimal,
    order_id: ExternalId,
    currency: Currency,
    method: Option<String>,
    desc: Option<String>,
    email: Option<String>,
    lang: Option<Language>,
    referal: Option<String>,
    us_key: Option<String>,
}

impl PaymentLink {
    /// Creates a link for `amount` in RUB.
    ///
    /// # Arguments
    ///
    /// * `amount` - Order amount, rendered verbatim (scale included) into the link
    /// * `order_id` - Order identifier in the merchant's system, up to 16
    ///   characters of `aA-zZ 0-9 : - _ [ ] |`
    #[must_use]
    pub fn new(amount: Decimal, order_id: impl Into<ExternalId>) -> Self {
        Self {
            amount,
            order_id: order_id.into(),
            currency: Currency::default(),
            method: None,
            desc: None,
            email: None,
            lang: None,
            referal: None,
            us_key: None,
        }
    }

    /// Sets the order currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Preselects a payment method by its aaio code name.
    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    /// Sets the order description shown to the payer.
    #[must_use]
    pub fn with_description(mut self, desc: &str) -> Self {
        self.desc = Some(desc.to_string());
        self
    }

    /// Prefills the payer's email.
    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Sets the payment page language.
    #[must_use]
    pub fn with_language(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Attaches a referral code.
    #[must_use]
    pub fn with_referral(mut self, referal: &str) -> Self {
        self.referal = Some(referal.to_string());
        self
    }

    /// Sets a value echoed back in the payment notification.
    #[must_use]
    pub fn with_us_key(mut self, us_key: &str) -> Self {
        self.us_key = Some(us_key.to_string());
        self
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the order identifier as it appears in the link, trimmed of
    /// surrounding whitespace.
    #[must_use]
    pub fn order_id(&self) -> String {
        self.order_id.to_string().trim().to_string()
    }

    /// Returns the link's query parameters without `sign`.
    ///
    /// The required fields come first; optional fields follow only when set.
    pub(crate) fn params(&self, shop_id: &str) -> Params {
        Params::new()
            .with("merchant_id", shop_id)
            .with("amount", self.amount)
            .with("order_id", self.order_id())
            .with("currency", self.currency)
            .with_optional([
                ("method", self.method.clone()),
                ("desc", self.desc.clone()),
                ("email", self.email.clone()),
                ("lang", self.lang.map(|l| l.as_str().to_string())),
                ("referal", self.referal.clone()),
                ("us_key", self.us_key.clone()),
            ])
    }
}
