//! Ordered request parameters.
//!
//! Used both for form-encoded POST bodies and for the payment-link query
//! string. Optional values are folded in only when present, so an unset
//! option never appears as an empty key.

use std::fmt::Display;

/// An ordered list of `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a required parameter.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    /// Appends every pair whose value is present and non-empty.
    #[must_use]
    pub fn with_optional<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Option<String>)>,
    {
        self.0.extend(
            pairs
                .into_iter()
                .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v))),
        );
        self
    }

    /// Returns the value of the first pair named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the pairs in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
