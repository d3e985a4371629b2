//! Order payload

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::Cart,
    checkout::{
        forms::{PaymentInfo, ShippingAddress},
        shipping::ShippingMethod,
        totals::CheckoutTotals,
    },
    ids::{OrderId, ProductId, VariantId},
    items::CartItem,
};

/// Path of the confirmation view for a placed order.
pub fn confirmation_path(order: &OrderId) -> String {
    format!("/order-confirmation/{order}")
}

/// How the shopper pays. Card data itself is handled by the payment
/// gateway; the order only records the method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodTag {
    /// Credit or debit card.
    #[default]
    CreditCard,
}

/// The payment details that are sent with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// How the order is paid.
    pub payment_method: PaymentMethodTag,

    /// Name on the card.
    pub cardholder_name: String,
}

impl From<&PaymentInfo> for PaymentSummary {
    fn from(payment: &PaymentInfo) -> Self {
        Self {
            payment_method: PaymentMethodTag::CreditCard,
            cardholder_name: payment.cardholder_name.trim().to_string(),
        }
    }
}

/// One ordered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Ordered product.
    pub product_id: ProductId,

    /// Ordered variant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price taken from the cart line.
    pub price: Decimal,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            variant_id: item.variant_id.clone(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Body of `POST /orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Every cart line.
    pub items: Vec<OrderLine>,

    /// Where to ship.
    pub shipping_address: ShippingAddress,

    /// Payment details without card data.
    pub payment_info: PaymentSummary,

    /// Chosen shipping method.
    pub shipping_method: ShippingMethod,

    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Tax on the subtotal.
    pub tax_amount: Decimal,

    /// Cost of the chosen shipping method.
    pub shipping_cost: Decimal,

    /// Subtotal plus tax plus shipping.
    pub total_amount: Decimal,
}

impl OrderRequest {
    /// Assemble an order from the cart, the checkout forms and the computed totals.
    pub fn new(
        cart: &Cart,
        shipping_address: &ShippingAddress,
        payment: &PaymentInfo,
        shipping_method: ShippingMethod,
        totals: &CheckoutTotals,
    ) -> Self {
        Self {
            items: cart.items().iter().map(OrderLine::from).collect(),
            shipping_address: shipping_address.clone(),
            payment_info: PaymentSummary::from(payment),
            shipping_method,
            subtotal: totals.subtotal,
            tax_amount: totals.tax,
            shipping_cost: totals.shipping_cost,
            total_amount: totals.grand_total,
        }
    }
}

/// Response of `POST /orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOrder {
    /// Order identifier.
    pub id: OrderId,

    /// Human-facing order number, when the backend assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Initial order status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CreatedOrder {
    /// Path of this order's confirmation view.
    pub fn confirmation_path(&self) -> String {
        confirmation_path(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn confirmation_path_contains_order_id() {
        let order = CreatedOrder {
            id: "ord_123".into(),
            order_number: None,
            status: None,
        };

        assert_eq!(order.confirmation_path(), "/order-confirmation/ord_123");
    }

    #[test]
    fn payment_summary_carries_no_card_data() -> TestResult {
        let payment = PaymentInfo {
            card_number: "4111111111111111".to_string(),
            expiry_date: "01/29".to_string(),
            cvv: "987".to_string(),
            cardholder_name: " Grace Hopper ".to_string(),
        };

        let json = serde_json::to_string(&PaymentSummary::from(&payment))?;

        assert_eq!(
            json,
            r#"{"payment_method":"credit_card","cardholder_name":"Grace Hopper"}"#
        );

        Ok(())
    }

    #[test]
    fn created_order_accepts_numeric_ids() -> TestResult {
        let order: CreatedOrder = serde_json::from_str(r#"{"id": 981, "status": "pending"}"#)?;

        assert_eq!(order.id.as_str(), "981");
        assert_eq!(order.status.as_deref(), Some("pending"));

        Ok(())
    }
}
