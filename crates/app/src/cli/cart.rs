use std::{io, sync::Arc};

use clap::{Args, Subcommand};
use storefront::{
    ids::CartItemId,
    items::{ProductRef, VariantRef},
};
use storefront_app::{config::ClientConfig, context::AppContext, render};

use super::console::ConsoleNotifier;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the current cart
    Show,

    /// Add a product to the cart
    Add(AddArgs),

    /// Set the quantity of a cart line; zero or less removes it
    Update(UpdateArgs),

    /// Remove a cart line
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    #[arg(long)]
    product: String,

    /// Product name shown in notifications
    #[arg(long)]
    name: String,

    /// Variant id
    #[arg(long)]
    variant: Option<String>,

    /// Variant name shown in notifications
    #[arg(long, requires = "variant")]
    variant_name: Option<String>,

    /// Units to add
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Cart line id
    item: String,

    /// New quantity
    #[arg(allow_hyphen_values = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Cart line id
    item: String,
}

pub(crate) async fn run(config: &ClientConfig, command: CartCommand) -> Result<(), String> {
    let context = AppContext::from_config(config, Arc::new(ConsoleNotifier))
        .await
        .map_err(|error| error.to_string())?;

    let store = &context.cart;

    store.restore().await;
    store.fetch_cart().await;

    let changed = match command.command {
        CartSubcommand::Show => true,
        CartSubcommand::Add(args) => {
            let product = ProductRef::new(args.product, args.name);
            let variant = args.variant.map(|id| {
                let name = args.variant_name.unwrap_or_else(|| id.clone());

                VariantRef::new(id, name)
            });

            store
                .add_to_cart(&product, variant.as_ref(), args.quantity)
                .await
        }
        CartSubcommand::Update(args) => {
            store
                .update_quantity(&CartItemId::from(args.item), args.quantity)
                .await
        }
        CartSubcommand::Remove(args) => store.remove_item(&CartItemId::from(args.item)).await,
        CartSubcommand::Clear => store.clear_cart().await,
    };

    render::write_cart(io::stdout().lock(), store.snapshot().as_ref())
        .map_err(|error| error.to_string())?;

    if changed {
        Ok(())
    } else {
        Err("cart was not changed".to_string())
    }
}
