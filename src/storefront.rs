//! Presentation layer: turns shopper actions into cart operations and
//! catalog queries, and reports back what should be shown.
use super::cart::CartState;
use super::catalog::{Catalog, Category, Product};
use super::config::StorefrontConfig;
use super::engine::CartEngine;
use super::error::CatalogError;
use super::format::format_price;
use super::notify::Subscription;
use super::storage::CartStore;
use tracing::warn;

pub const WELCOME_MESSAGE: &str = "Welcome to AJIO Shopping!";
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";
pub const SUBSCRIBED_MESSAGE: &str = "Thank you for subscribing!";
pub const SIGN_IN_MESSAGE: &str = "Sign in functionality coming soon!";
pub const UNSAVED_CART_WARNING: &str =
    "Your cart could not be saved on this device. Changes may be lost on reload.";

/// Everything a shopper can do on the page. Cart actions carry a product id
/// and the product itself is looked up in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart { product_id: String },
    RemoveFromCart { product_id: String },
    SetQuantity { product_id: String, quantity: i64 },
    FilterCategory(String),
    Search(String),
    SubmitSearch(String),
    Subscribe { email: String },
    SignIn,
    ViewDeal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub product_id: String,
    pub title: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub item_count: u128,
    pub total: String,
    pub rows: Vec<CartRow>,
    pub empty_message: Option<&'static str>,
}

impl CartView {
    pub fn render(state: &CartState, currency_symbol: &str) -> Self {
        let rows: Vec<CartRow> = state
            .lines()
            .iter()
            .map(|line| CartRow {
                product_id: line.product.id.clone(),
                title: line.product.title.clone(),
                image: line.product.image.clone(),
                unit_price: format_price(u128::from(line.product.price), currency_symbol),
                quantity: line.quantity,
            })
            .collect();

        Self {
            item_count: state.item_count(),
            total: format_price(state.total(), currency_symbol),
            empty_message: rows.is_empty().then_some(EMPTY_CART_MESSAGE),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub cart: CartView,
    pub visible: Vec<String>, // product ids currently listed
    pub toast: Option<String>,
    pub warning: Option<String>,
}

pub struct Storefront<'a, S> {
    catalog: &'a Catalog,
    engine: &'a mut CartEngine<S>,
    config: &'a StorefrontConfig,
    events: Subscription,
    visible: Vec<String>,
}

impl<'a, S: CartStore> Storefront<'a, S> {
    pub fn new(
        catalog: &'a Catalog,
        engine: &'a mut CartEngine<S>,
        config: &'a StorefrontConfig,
    ) -> Self {
        let events = engine.subscribe();
        let visible = catalog.products().iter().map(|p| p.id.clone()).collect();

        Self {
            catalog,
            engine,
            config,
            events,
            visible,
        }
    }

    pub fn welcome(&self) -> &'static str {
        WELCOME_MESSAGE
    }

    pub fn cart_view(&self) -> CartView {
        CartView::render(self.engine.state(), self.config.currency_symbol())
    }

    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, CatalogError> {
        let mut toast = None;
        let mut warning = None;

        let cart_result = match action {
            Action::AddToCart { product_id } => {
                let product = self.catalog.get(&product_id)?.clone();
                Some(self.engine.add(product).map(|_| ()))
            }
            Action::RemoveFromCart { product_id } => {
                Some(self.engine.remove(&product_id).map(|_| ()))
            }
            Action::SetQuantity {
                product_id,
                quantity,
            } => Some(self.engine.set_quantity(&product_id, quantity).map(|_| ())),
            Action::FilterCategory(label) => {
                let category = Category::from_filter_label(&label);
                self.visible = ids(self.catalog.filter(category));
                None
            }
            Action::Search(query) => {
                self.visible = ids(self.catalog.search(query.trim()));
                None
            }
            Action::SubmitSearch(query) => {
                let query = query.trim();
                if !query.is_empty() {
                    toast = Some(format!("Searching for \"{query}\"..."));
                }
                None
            }
            Action::Subscribe { email } => {
                if !email.trim().is_empty() {
                    toast = Some(SUBSCRIBED_MESSAGE.to_string());
                }
                None
            }
            Action::SignIn => {
                toast = Some(SIGN_IN_MESSAGE.to_string());
                None
            }
            Action::ViewDeal(title) => {
                toast = Some(format!("Viewing deal: {title}"));
                None
            }
        };

        if let Some(Err(err)) = cart_result {
            warn!(error = %err, "cart change was not saved");
            warning = Some(UNSAVED_CART_WARNING.to_string());
        }

        // cart toasts come from the engine's notifications
        if let Some(event) = self.events.drain().pop() {
            toast = Some(event.message().to_string());
        }

        Ok(Outcome {
            cart: self.cart_view(),
            visible: self.visible.clone(),
            toast,
            warning,
        })
    }
}

fn ids(products: Vec<&Product>) -> Vec<String> {
    products.into_iter().map(|p| p.id.clone()).collect()
}
