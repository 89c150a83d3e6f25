//! Checkout and order history commands.

use clap::Args;
use shopprime_client::api::types::ShippingAddress;
use shopprime_client::cart::CartStore;

use super::{CliError, Context, format_amount};

#[derive(Args)]
pub struct CheckoutArgs {
    /// Address label
    #[arg(long, default_value = "Home")]
    pub label: String,

    /// Address line 1
    #[arg(long)]
    pub line1: String,

    /// Address line 2
    #[arg(long)]
    pub line2: Option<String>,

    /// City
    #[arg(long)]
    pub city: String,

    /// State
    #[arg(long)]
    pub state: String,

    /// Postal code
    #[arg(long)]
    pub pincode: String,

    /// Country
    #[arg(long, default_value = "USA")]
    pub country: String,

    /// Coupon code to apply
    #[arg(long)]
    pub coupon: Option<String>,
}

#[allow(clippy::print_stdout)]
pub async fn checkout(ctx: &Context, args: CheckoutArgs) -> Result<(), CliError> {
    ctx.require_session().await?;

    let store = CartStore::create(ctx.api.clone(), ctx.auth.subscribe());
    store.load().await?;

    if store.count() == 0 {
        store.teardown();
        return Err(CliError::InvalidArgument(
            "Your cart is empty. Add some products to checkout.".to_string(),
        ));
    }

    // Validate the coupon against the cart total before committing.
    if let Some(code) = &args.coupon {
        let check = ctx.api.apply_coupon(code, store.total()).await?;
        if !check.valid {
            store.teardown();
            return Err(CliError::InvalidArgument(format!("Invalid coupon: {code}")));
        }
        println!("Coupon {code} applied: -{}", format_amount(check.discount));
    }

    let address = ShippingAddress {
        label: args.label,
        line1: args.line1,
        line2: args.line2,
        city: args.city,
        state: args.state,
        pincode: args.pincode,
        country: args.country,
    };

    let order = ctx.api.place_order(address, args.coupon).await?;

    // Order placement invalidated the cart server-side; mirror that locally.
    store.clear();
    store.teardown();

    println!("Order placed successfully!");
    println!("  order:  {}", order.id);
    println!("  total:  {}", format_amount(order.total));
    println!("  status: {}", order.order_status.as_str());
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn history(ctx: &Context) -> Result<(), CliError> {
    ctx.require_session().await?;

    let orders = ctx.api.my_orders().await?;
    if orders.is_empty() {
        println!("You haven't placed any orders yet.");
        return Ok(());
    }

    for order in &orders {
        println!(
            "{}  {}  {}  {}",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            format_amount(order.total),
            order.order_status.as_str(),
        );
        for item in &order.items {
            println!("    {} x {}  {}", item.name, item.quantity, format_amount(item.price));
        }
    }
    Ok(())
}
