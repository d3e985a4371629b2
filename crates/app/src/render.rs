//! Console rendering of the cart and checkout totals.

use std::{io, ops::Range};

use rust_decimal::Decimal;
use storefront::{
    cart::Cart,
    checkout::{CheckoutTotals, ShippingMethod},
    items::CartItem,
    prices::TaxRate,
};
use tabled::{
    Table,
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

/// Errors raised while writing console output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Output stream failed.
    #[error("failed to write output")]
    Io(#[from] io::Error),
}

/// `$12.50`
pub fn format_money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Write the cart as a table followed by its totals.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: Option<&Cart>) -> Result<(), RenderError> {
    let Some(cart) = cart.filter(|cart| !cart.is_empty()) else {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    };

    let mut builder = Builder::default();

    builder.push_record(["Line", "Item", "Qty", "Unit Price", "Line Total"]);

    for item in cart.items() {
        builder.push_record([
            item.id.to_string(),
            item_label(item),
            item.quantity.to_string(),
            format_money(item.price),
            format_money(item.line_total()),
        ]);
    }

    let table = style(builder.build(), Columns::new(2..5));

    writeln!(out, "{table}")?;
    writeln!(out, " Items: {}", cart.total_items())?;
    writeln!(out, " Subtotal: {}", format_money(cart.total_amount()))?;

    Ok(())
}

/// Write the order summary shown on the review step.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_totals(
    mut out: impl io::Write,
    totals: &CheckoutTotals,
    method: ShippingMethod,
    tax_rate: TaxRate,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Summary", "Amount"]);
    builder.push_record(["Subtotal".to_string(), format_money(totals.subtotal)]);
    builder.push_record([format!("Tax ({tax_rate})"), format_money(totals.tax)]);
    builder.push_record([
        method.label().to_string(),
        format_money(totals.shipping_cost),
    ]);
    builder.push_record(["Total".to_string(), format_money(totals.grand_total)]);

    let table = style(builder.build(), Columns::new(1..2));

    writeln!(out, "{table}")?;

    Ok(())
}

fn item_label(item: &CartItem) -> String {
    let name = item
        .product_name
        .as_deref()
        .unwrap_or_else(|| item.product_id.as_str());

    match &item.variant_name {
        Some(variant) => format!("{name} ({variant})"),
        None => name.to_string(),
    }
}

fn style(mut table: Table, amounts: Columns<Range<usize>>) -> Table {
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(amounts, Alignment::right());

    table
}
