//! Checkout forms

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use zeroize::Zeroize;

use crate::checkout::step::CheckoutStep;

/// Field names reported when a step fails validation.
pub type MissingFields = SmallVec<[&'static str; 8]>;

/// A step could not be completed because required input is missing.
///
/// The message shown to shoppers is deliberately generic; the missing field
/// names are kept for logging and field highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("please fill all required fields")]
pub struct ValidationError {
    step: CheckoutStep,
    missing: MissingFields,
}

impl ValidationError {
    pub(crate) fn new(step: CheckoutStep, missing: MissingFields) -> Self {
        Self { step, missing }
    }

    /// The step that failed validation.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Names of the missing fields, in form order.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

/// Collect the names of `fields` whose value is blank after trimming.
pub(crate) fn blank_fields<'a>(
    fields: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> MissingFields {
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

/// Shipping address collected on the first checkout step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient's first name.
    pub first_name: String,

    /// Recipient's last name.
    pub last_name: String,

    /// Contact email for order updates.
    pub email: String,

    /// Optional contact number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Postal code.
    pub zip_code: String,

    /// Optional country; the backend assumes the store's country when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ShippingAddress {
    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> MissingFields {
        blank_fields([
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zip_code", self.zip_code.as_str()),
        ])
    }

    /// Full name for display and order summaries.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Card details collected on the payment step.
///
/// Card data never leaves the client in an order payload; only the
/// cardholder name is sent. Sensitive fields are wiped on drop and never
/// printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentInfo {
    /// Card number as typed.
    pub card_number: String,

    /// Expiry, e.g. `12/30`.
    pub expiry_date: String,

    /// Card security code.
    pub cvv: String,

    /// Name printed on the card.
    pub cardholder_name: String,
}

impl PaymentInfo {
    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> MissingFields {
        blank_fields([
            ("card_number", self.card_number.as_str()),
            ("expiry_date", self.expiry_date.as_str()),
            ("cvv", self.cvv.as_str()),
            ("cardholder_name", self.cardholder_name.as_str()),
        ])
    }

    /// Last four digits of the card number, if it has at least four.
    pub fn last_four(&self) -> Option<String> {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        let start = digits.len().checked_sub(4)?;

        digits.get(start..).map(|tail| tail.iter().collect())
    }
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &"**redacted**")
            .field("expiry_date", &"**redacted**")
            .field("cvv", &"**redacted**")
            .field("cardholder_name", &self.cardholder_name)
            .finish()
    }
}

impl Drop for PaymentInfo {
    fn drop(&mut self) {
        self.card_number.zeroize();
        self.expiry_date.zeroize();
        self.cvv.zeroize();
    }
}
