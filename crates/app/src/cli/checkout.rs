use std::{fs, io, path::PathBuf, sync::Arc};

use clap::Args;
use serde::Deserialize;
use storefront::checkout::{PaymentInfo, ShippingAddress, ShippingMethod};
use storefront_app::{
    checkout::CheckoutWizard, config::ClientConfig, context::AppContext, render,
};

use super::console::{ConsoleNavigator, ConsoleNotifier};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// JSON file with `shipping`, `payment` and `terms_accepted`
    #[arg(long)]
    form: PathBuf,

    /// Shipping method (standard, express, overnight)
    #[arg(long)]
    method: Option<ShippingMethod>,
}

#[derive(Deserialize)]
struct CheckoutForm {
    shipping: ShippingAddress,
    payment: PaymentInfo,

    #[serde(default)]
    terms_accepted: bool,

    #[serde(default)]
    shipping_method: Option<ShippingMethod>,
}

pub(crate) async fn run(config: &ClientConfig, args: CheckoutArgs) -> Result<(), String> {
    let raw = fs::read_to_string(&args.form)
        .map_err(|error| format!("failed to read {}: {error}", args.form.display()))?;

    let form: CheckoutForm =
        serde_json::from_str(&raw).map_err(|error| format!("invalid checkout form: {error}"))?;

    let context = AppContext::from_config(config, Arc::new(ConsoleNotifier))
        .await
        .map_err(|error| error.to_string())?;

    context.cart.restore().await;
    context.cart.fetch_cart().await;

    let mut wizard = context.checkout(Arc::new(ConsoleNavigator));

    let CheckoutForm {
        shipping,
        payment,
        terms_accepted,
        shipping_method,
    } = form;

    wizard.session_mut().shipping = shipping;
    advance(&mut wizard)?;

    wizard.session_mut().payment = payment;
    wizard.session_mut().terms_accepted = terms_accepted;
    advance(&mut wizard)?;

    if let Some(method) = args.method.or(shipping_method) {
        wizard.select_shipping_method(method);
    }

    render::write_cart(io::stdout().lock(), context.cart.snapshot().as_ref())
        .map_err(|error| error.to_string())?;
    render::write_totals(
        io::stdout().lock(),
        &wizard.totals(),
        wizard.session().shipping_method,
        context.pricing.tax_rate,
    )
    .map_err(|error| error.to_string())?;

    let order = wizard.place_order().await.map_err(|error| {
        wizard
            .error()
            .map_or_else(|| error.to_string(), str::to_string)
    })?;

    println!("order {order} placed");

    Ok(())
}

fn advance(wizard: &mut CheckoutWizard) -> Result<(), String> {
    if wizard.next() {
        return Ok(());
    }

    let step = wizard.step();
    let message = wizard.error().unwrap_or("cannot continue").to_string();

    match wizard.session().validate_step(step) {
        Err(error) => {
            let missing = error.missing().join(", ");

            Err(format!("{step}: {message} (missing: {missing})"))
        }
        Ok(()) => Err(format!("{step}: {message}")),
    }
}
