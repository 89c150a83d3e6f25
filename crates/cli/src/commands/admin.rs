//! Admin back-office commands.
//!
//! Every subcommand resumes the session first; the backend enforces the
//! admin role, so a customer token gets a clean rejection rather than a
//! client-side guess.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use rust_decimal::Decimal;
use shopprime_client::api::types::{CouponInput, Order, ProductInput};
use shopprime_core::{CouponId, DiscountType, OrderId, OrderStatus, ProductId, UserId};

use super::{CliError, Context, format_amount};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Show revenue, order, user, and product totals
    Dashboard,
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage coupons
    Coupons {
        #[command(subcommand)]
        action: CouponAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List every product, including out-of-stock ones
    List,
    /// Create a product
    Create(ProductFields),
    /// Update a product, replacing all of its fields
    Update {
        /// Product id
        id: String,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(clap::Args)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Brand
    #[arg(long, default_value = "")]
    pub brand: String,

    /// Category
    #[arg(long)]
    pub category: String,

    /// Price
    #[arg(long)]
    pub price: Decimal,

    /// Discounted price
    #[arg(long)]
    pub discount_price: Option<Decimal>,

    /// Image URL (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    pub stock: u32,

    /// Feature on the home page
    #[arg(long)]
    pub featured: bool,
}

impl From<ProductFields> for ProductInput {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            brand: fields.brand,
            category: fields.category,
            price: fields.price,
            discount_price: fields.discount_price,
            images: fields.images,
            stock: fields.stock,
            is_featured: fields.featured,
        }
    }
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// List every order
    List,
    /// Set an order's lifecycle status
    SetStatus {
        /// Order id
        id: String,

        /// New status: placed, confirmed, shipped, out_for_delivery,
        /// delivered, cancelled
        status: String,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List every user account
    List,
    /// Block a user from signing in
    Block {
        /// User id
        id: String,
    },
    /// Unblock a user
    Unblock {
        /// User id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CouponAction {
    /// List every coupon
    List,
    /// Create a coupon
    Create {
        /// Coupon code customers will enter
        code: String,

        /// Discount type: percentage or flat
        #[arg(long, default_value = "percentage")]
        discount_type: String,

        /// Discount value (percent or amount, per the type)
        #[arg(long)]
        value: Decimal,

        /// Minimum order value required
        #[arg(long)]
        min_order: Option<Decimal>,

        /// Expiry date, RFC 3339 (e.g. 2026-12-31T00:00:00Z)
        #[arg(long)]
        expires: DateTime<Utc>,
    },
    /// Delete a coupon
    Delete {
        /// Coupon id
        id: String,
    },
}

pub async fn run(ctx: &Context, action: AdminAction) -> Result<(), CliError> {
    ctx.require_session().await?;

    match action {
        AdminAction::Dashboard => dashboard(ctx).await,
        AdminAction::Products { action } => products(ctx, action).await,
        AdminAction::Orders { action } => orders(ctx, action).await,
        AdminAction::Users { action } => users(ctx, action).await,
        AdminAction::Coupons { action } => coupons(ctx, action).await,
    }
}

#[allow(clippy::print_stdout)]
async fn dashboard(ctx: &Context) -> Result<(), CliError> {
    let dashboard = ctx.api.admin_dashboard().await?;

    println!("revenue:  {}", format_amount(dashboard.stats.total_revenue));
    println!("orders:   {}", dashboard.stats.total_orders);
    println!("users:    {}", dashboard.stats.total_users);
    println!("products: {}", dashboard.stats.total_products);

    if !dashboard.recent_orders.is_empty() {
        println!("\nRecent orders:");
        for order in &dashboard.recent_orders {
            render_order_line(order);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn products(ctx: &Context, action: ProductAction) -> Result<(), CliError> {
    match action {
        ProductAction::List => {
            for product in ctx.api.admin_products().await? {
                println!(
                    "{}  {}  stock {}  {}",
                    product.id,
                    format_amount(product.price),
                    product.stock,
                    product.name,
                );
            }
        }
        ProductAction::Create(fields) => {
            let product = ctx.api.admin_create_product(&fields.into()).await?;
            println!("Created product {}", product.id);
        }
        ProductAction::Update { id, fields } => {
            let product = ctx
                .api
                .admin_update_product(&ProductId::new(id), &fields.into())
                .await?;
            println!("Updated product {}", product.id);
        }
        ProductAction::Delete { id } => {
            let id = ProductId::new(id);
            ctx.api.admin_delete_product(&id).await?;
            println!("Deleted product {id}");
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn orders(ctx: &Context, action: OrderAction) -> Result<(), CliError> {
    match action {
        OrderAction::List => {
            for order in ctx.api.admin_orders().await? {
                render_order_line(&order);
            }
        }
        OrderAction::SetStatus { id, status } => {
            let status: OrderStatus = status
                .parse()
                .map_err(CliError::InvalidArgument)?;
            let order = ctx
                .api
                .admin_update_order_status(&OrderId::new(id), status)
                .await?;
            println!("Order {} is now {}", order.id, order.order_status.as_str());
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn users(ctx: &Context, action: UserAction) -> Result<(), CliError> {
    match action {
        UserAction::List => {
            for user in ctx.api.admin_users().await? {
                let blocked = if user.is_blocked { "  [blocked]" } else { "" };
                println!("{}  {}  {}{}", user.id, user.email, user.name, blocked);
            }
        }
        UserAction::Block { id } => {
            let user = ctx
                .api
                .admin_set_user_blocked(&UserId::new(id), true)
                .await?;
            println!("Blocked {}", user.email);
        }
        UserAction::Unblock { id } => {
            let user = ctx
                .api
                .admin_set_user_blocked(&UserId::new(id), false)
                .await?;
            println!("Unblocked {}", user.email);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn coupons(ctx: &Context, action: CouponAction) -> Result<(), CliError> {
    match action {
        CouponAction::List => {
            for coupon in ctx.api.admin_coupons().await? {
                let value = match coupon.discount_type {
                    DiscountType::Percentage => format!("{}%", coupon.discount_value),
                    DiscountType::Flat => format_amount(coupon.discount_value),
                };
                println!(
                    "{}  {}  -{}  expires {}",
                    coupon.id,
                    coupon.code,
                    value,
                    coupon.expiry_date.format("%Y-%m-%d"),
                );
            }
        }
        CouponAction::Create {
            code,
            discount_type,
            value,
            min_order,
            expires,
        } => {
            let discount_type = parse_discount_type(&discount_type)?;
            let input = CouponInput {
                code,
                discount_type,
                discount_value: value,
                min_order_value: min_order,
                expiry_date: expires,
            };
            let coupon = ctx.api.admin_create_coupon(&input).await?;
            println!("Created coupon {} ({})", coupon.code, coupon.id);
        }
        CouponAction::Delete { id } => {
            let id = CouponId::new(id);
            ctx.api.admin_delete_coupon(&id).await?;
            println!("Deleted coupon {id}");
        }
    }
    Ok(())
}

fn parse_discount_type(raw: &str) -> Result<DiscountType, CliError> {
    match raw {
        "percentage" => Ok(DiscountType::Percentage),
        "flat" => Ok(DiscountType::Flat),
        other => Err(CliError::InvalidArgument(format!(
            "unknown discount type: {other} (expected percentage or flat)"
        ))),
    }
}

#[allow(clippy::print_stdout)]
fn render_order_line(order: &Order) {
    println!(
        "{}  {}  {}  {}",
        order.id,
        order.created_at.format("%Y-%m-%d"),
        format_amount(order.total),
        order.order_status.as_str(),
    );
}
