//! Product browsing commands.

use clap::Subcommand;
use rust_decimal::Decimal;
use shopprime_client::api::types::{Product, ProductFilters, ProductSort};
use shopprime_core::ProductId;

use super::{CliError, Context, format_amount};

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products, optionally filtered
    List {
        /// Search term matched against product names
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to one category
        #[arg(short, long)]
        category: Option<String>,

        /// Minimum price
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Maximum price
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort order: newest, price_low, price_high
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },
    /// List all categories
    Categories,
}

pub async fn run(ctx: &Context, action: ProductsAction) -> Result<(), CliError> {
    match action {
        ProductsAction::List {
            search,
            category,
            min_price,
            max_price,
            sort,
        } => {
            let sort = parse_sort(&sort)?;
            let filters = ProductFilters {
                search,
                category,
                min_price,
                max_price,
                sort,
            };
            let products = ctx.api.get_products(&filters).await?;
            render_listing(&products);
        }
        ProductsAction::Show { id } => {
            let product = ctx.api.get_product(&ProductId::new(id)).await?;
            render_product(&product);
        }
        ProductsAction::Categories => {
            let categories = ctx.api.get_categories().await?;
            render_categories(&categories);
        }
    }
    Ok(())
}

fn parse_sort(raw: &str) -> Result<ProductSort, CliError> {
    match raw {
        "newest" => Ok(ProductSort::Newest),
        "price_low" => Ok(ProductSort::PriceLowToHigh),
        "price_high" => Ok(ProductSort::PriceHighToLow),
        other => Err(CliError::InvalidArgument(format!(
            "unknown sort: {other} (expected newest, price_low, price_high)"
        ))),
    }
}

#[allow(clippy::print_stdout)]
fn render_listing(products: &[Product]) {
    if products.is_empty() {
        println!("No products found matching your criteria.");
        return;
    }
    for product in products {
        let price = product
            .discount_price
            .map_or_else(|| format_amount(product.price), format_amount);
        let stock = if product.in_stock() { "" } else { "  [out of stock]" };
        println!("{}  {}  {}{}", product.id, price, product.name, stock);
    }
}

#[allow(clippy::print_stdout)]
fn render_product(product: &Product) {
    println!("{}", product.name);
    println!("  id:       {}", product.id);
    println!("  brand:    {}", product.brand);
    println!("  category: {}", product.category);
    match product.discount_price {
        Some(discount) => println!(
            "  price:    {} (was {})",
            format_amount(discount),
            format_amount(product.price)
        ),
        None => println!("  price:    {}", format_amount(product.price)),
    }
    println!("  rating:   {:.1}", product.average_rating);
    println!(
        "  stock:    {}",
        if product.in_stock() {
            format!("{} available", product.stock)
        } else {
            "out of stock".to_string()
        }
    );
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
}

#[allow(clippy::print_stdout)]
fn render_categories(categories: &[String]) {
    for category in categories {
        println!("{category}");
    }
}
