use chrono::Utc;
use storefront_cart::{
    catalog::{Catalog, Category, Product},
    config::StorefrontConfig,
    deals::DealTimer,
    engine::CartEngine,
    storage::SledStore,
    storefront::{Action, Storefront},
    utils::new_product_id,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = StorefrontConfig::new().set_db_path("sled");
    let store = SledStore::open(config.db_path())?;

    let mut catalog = Catalog::builtin();
    let id = new_product_id()?;
    catalog.insert(
        Product::new(&id, "Canvas Tote Bag", 699, Category::Accessories).set_badge("New"),
    )?;

    // whatever was in the cart last run is picked up here
    let mut engine = CartEngine::with_config(store, &config);
    let mut front = Storefront::new(&catalog, &mut engine, &config);
    println!("{}", front.welcome());

    let actions = vec![
        Action::FilterCategory("Men's Clothing".into()),
        Action::AddToCart {
            product_id: "1".into(),
        },
        Action::AddToCart {
            product_id: "1".into(),
        },
        Action::AddToCart { product_id: id },
        Action::SetQuantity {
            product_id: "1".into(),
            quantity: 3,
        },
        Action::Subscribe {
            email: "shopper@example.in".into(),
        },
    ];

    for action in actions {
        let outcome = front.dispatch(action)?;
        if let Some(toast) = &outcome.toast {
            println!("toast: {toast}");
        }
        if let Some(warning) = &outcome.warning {
            println!("warning: {warning}");
        }
    }

    let view = front.cart_view();
    for row in &view.rows {
        println!("{} x{} @ {}", row.title, row.quantity, row.unit_price);
    }
    println!("{} items, total {}", view.item_count, view.total);

    let now = Utc::now();
    let deals = ["Flat 50% Off", "Buy 1 Get 1 Free"];
    for timer in DealTimer::schedule(&deals, now, config.deal_hours_step()) {
        println!("{}: {}", timer.title, timer.label(now));
    }

    Ok(())
}
