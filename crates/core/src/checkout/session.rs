//! Checkout session

use crate::{
    cart::Cart,
    checkout::{
        errors::CheckoutError,
        forms::{MissingFields, PaymentInfo, ShippingAddress, ValidationError},
        order::OrderRequest,
        shipping::ShippingMethod,
        step::CheckoutStep,
        totals::{CheckoutPricing, CheckoutTotals},
    },
};

/// Form state of one checkout attempt.
///
/// The session only lives as long as the checkout view; nothing in it is
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    step: CheckoutStep,

    /// Shipping form.
    pub shipping: ShippingAddress,

    /// Payment form.
    pub payment: PaymentInfo,

    /// Whether the shopper accepted the terms and conditions.
    pub terms_accepted: bool,

    /// Selected delivery speed.
    pub shipping_method: ShippingMethod,
}

impl CheckoutSession {
    /// A fresh session on the shipping step.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Check that `step` has all of its required input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the missing fields.
    pub fn validate_step(&self, step: CheckoutStep) -> Result<(), ValidationError> {
        let missing: MissingFields = match step {
            CheckoutStep::Shipping => self.shipping.missing_fields(),
            CheckoutStep::Payment => {
                let mut missing = self.payment.missing_fields();

                if !self.terms_accepted {
                    missing.push("terms_accepted");
                }

                missing
            }
            CheckoutStep::Review => MissingFields::new(),
        };

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(step, missing))
        }
    }

    /// Whether the current step may move forward.
    pub fn can_advance(&self) -> bool {
        self.step.next().is_some() && self.validate_step(self.step).is_ok()
    }

    /// Move to the next step if the current one is valid.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Validation`]: the current step is incomplete; the
    ///   step does not change.
    /// - [`CheckoutError::AlreadyAtReview`]: there is no further step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let next = self.step.next().ok_or(CheckoutError::AlreadyAtReview)?;

        self.validate_step(self.step)?;
        self.step = next;

        Ok(next)
    }

    /// Move back one step. Going back is never gated.
    pub fn back(&mut self) -> CheckoutStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }

        self.step
    }

    /// Change the delivery speed.
    pub fn select_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = method;
    }

    /// Totals for `cart` with the selected shipping method.
    pub fn totals(&self, cart: &Cart, pricing: &CheckoutPricing) -> CheckoutTotals {
        CheckoutTotals::compute(cart.total_amount(), self.shipping_method, pricing)
    }

    /// Build the order payload for submission.
    ///
    /// Every step is validated again before anything is assembled.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NotAtReview`]: the session has not reached review.
    /// - [`CheckoutError::Validation`]: shipping or payment input is missing.
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    pub fn prepare_order(
        &self,
        cart: &Cart,
        pricing: &CheckoutPricing,
    ) -> Result<OrderRequest, CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::NotAtReview(self.step));
        }

        self.validate_step(CheckoutStep::Payment)?;
        self.validate_step(CheckoutStep::Shipping)?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(OrderRequest::new(
            cart,
            &self.shipping,
            &self.payment,
            self.shipping_method,
            &self.totals(cart, pricing),
        ))
    }
}
