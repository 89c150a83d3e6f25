//! Cart commands.
//!
//! Builds a [`CartStore`] wired to the resumed session, performs one
//! operation, and prints the resulting state. Failure messages come
//! straight from the store; the user decides whether to retry.

use clap::Subcommand;
use shopprime_client::cart::CartStore;
use shopprime_core::{CartItemId, ProductId};

use super::{CliError, Context, format_amount};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart's current contents
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line to an exact quantity
    Set {
        /// Cart line id
        item_id: String,

        /// New quantity (must be at least 1; remove the line instead of
        /// setting 0)
        quantity: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Cart line id
        item_id: String,
    },
}

pub async fn run(ctx: &Context, action: CartAction) -> Result<(), CliError> {
    ctx.require_session().await?;

    let store = CartStore::create(ctx.api.clone(), ctx.auth.subscribe());
    store.load().await?;

    let result = match &action {
        CartAction::Show => Ok(()),
        CartAction::Add {
            product_id,
            quantity,
        } => {
            store
                .add_item(&ProductId::new(product_id.clone()), *quantity)
                .await
        }
        CartAction::Set { item_id, quantity } => {
            store
                .update_quantity(&CartItemId::new(item_id.clone()), *quantity)
                .await
        }
        CartAction::Remove { item_id } => {
            store.remove_item(&CartItemId::new(item_id.clone())).await
        }
    };

    render_cart(&store);
    store.teardown();

    result.map_err(CliError::from)
}

#[allow(clippy::print_stdout)]
fn render_cart(store: &CartStore) {
    let items = store.items();
    if items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in &items {
        let line_total = item.effective_price() * rust_decimal::Decimal::from(item.quantity);
        println!(
            "{}  {} x {}  {}  (product {})",
            item.id,
            item.quantity,
            format_amount(item.effective_price()),
            format_amount(line_total),
            item.product_id,
        );
    }
    println!("---");
    println!("{} items, total {}", store.count(), format_amount(store.total()));
}
