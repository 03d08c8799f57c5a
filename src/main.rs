//! # Checkout Upsell Demo
//!
//! Mounts the widget against the in-memory host and walks through:
//! 1. Loading two configured products, one of which is already in the cart.
//! 2. Adding the other one.
//! 3. Removing it again.

use checkout_upsell::clients::UpsellClient;
use checkout_upsell::host::memory::{InMemoryCart, InMemoryCatalog};
use checkout_upsell::host::{EnglishLocalizer, Host};
use checkout_upsell::lifecycle::{setup_tracing, UpsellSystem};
use checkout_upsell::model::{CartLine, CartPermissions, Settings, VariantNode};
use std::sync::Arc;
use tracing::{error, info, Instrument};

const SHIRT: &str = "gid://shopify/ProductVariant/1";
const SOCKS: &str = "gid://shopify/ProductVariant/2";

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting checkout upsell demo");

    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.insert(VariantNode::new(SHIRT).titled("Shirt").priced("20.00", "USD"));
    catalog.insert(
        VariantNode::new(SOCKS)
            .titled("Socks")
            .priced("5.50", "USD")
            .with_image("https://cdn.example/socks.png", Some("Striped socks")),
    );

    let cart = Arc::new(InMemoryCart::new());
    cart.report_line_ids(true);
    cart.push_line(CartLine::new("gid://shopify/CartLine/100", SOCKS));

    let settings = Settings::new()
        .with("number_of_products", 2u32)
        .with("upsell_product_1", SHIRT)
        .with("upsell_product_2", SOCKS)
        .with("upsell_heading", "Complete your look");

    let host = Host::new(catalog.clone(), cart.clone());
    let mut system = UpsellSystem::new(host, Arc::new(EnglishLocalizer), settings);
    system.follow_cart(cart.subscribe());

    system
        .client
        .update_permissions(CartPermissions::all())
        .await
        .map_err(|e| e.to_string())?;

    render(&system.client, "initial").await?;

    let span = tracing::info_span!("add_shirt");
    let outcome = async {
        info!("Checking the shirt");
        system.client.toggle(SHIRT.into(), true).await
    }
    .instrument(span)
    .await;
    match outcome {
        Ok(outcome) => info!(?outcome, "Shirt toggled on"),
        Err(e) => error!(error = %e, "Toggle failed"),
    }
    render(&system.client, "after add").await?;

    let span = tracing::info_span!("remove_shirt");
    let outcome = async {
        info!("Unchecking the shirt");
        system.client.toggle(SHIRT.into(), false).await
    }
    .instrument(span)
    .await;
    match outcome {
        Ok(outcome) => info!(?outcome, "Shirt toggled off"),
        Err(e) => error!(error = %e, "Toggle failed"),
    }
    render(&system.client, "after remove").await?;

    info!(lines = cart.lines().len(), queries = catalog.queried().len(), "Host state");

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

async fn render(client: &UpsellClient, stage: &str) -> Result<(), String> {
    let snapshot = client.wait_until_settled().await.map_err(|e| e.to_string())?;
    info!(stage, view = %snapshot.view, "Rendered");
    Ok(())
}
