//! Test fixtures

use rust_decimal::Decimal;
use storefront::{
    checkout::{PaymentInfo, ShippingAddress},
    items::{CartItem, ProductRef, VariantRef},
};

pub fn product(id: &str, name: &str) -> ProductRef {
    ProductRef::new(id, name)
}

pub fn variant(id: &str, name: &str) -> VariantRef {
    VariantRef::new(id, name)
}

/// A cart line priced in cents.
pub fn item(id: &str, product: &str, variant: Option<&str>, quantity: u32, cents: i64) -> CartItem {
    CartItem {
        id: id.into(),
        product_id: product.into(),
        variant_id: variant.map(Into::into),
        quantity,
        price: Decimal::new(cents, 2),
        product_name: None,
        variant_name: None,
    }
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: Some("+44 20 7946 0000".to_string()),
        address: "12 Analytical Row".to_string(),
        city: "London".to_string(),
        state: "LDN".to_string(),
        zip_code: "N1 9GU".to_string(),
        country: Some("GB".to_string()),
    }
}

pub fn payment() -> PaymentInfo {
    PaymentInfo {
        card_number: "4242424242424242".to_string(),
        expiry_date: "12/30".to_string(),
        cvv: "123".to_string(),
        cardholder_name: "Ada Lovelace".to_string(),
    }
}
