//! aaio authentication: the API key header and payment-link signatures.
//!
//! Remote calls authenticate with a static `X-Api-Key` header. Payment
//! links are generated locally and carry a `sign` parameter computed from
//! secret key #1, which never leaves the process.

use sha2::{Digest, Sha256};

use crate::models::Currency;

/// Header carrying the API key on every remote call (`X-Api-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Computes the `sign` parameter of a payment link.
///
/// Algorithm: `hex(SHA256("{shop_id}:{amount}:{currency}:{secret_key}:{order_id}"))`
///
/// `amount` must be the exact string placed in the link's `amount`
/// parameter; the server recomputes the digest from the link.
pub fn sign(
    shop_id: &str,
    amount: &str,
    currency: Currency,
    secret_key: &str,
    order_id: &str,
) -> String {
    let payload = [shop_id, amount, currency.as_str(), secret_key, order_id].join(":");
    hex::encode(Sha256::digest(payload.as_bytes()))
}
