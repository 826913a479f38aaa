//! Cart notifications for whoever is presenting the cart.
//!
//! - Fire-and-forget fan-out over channels
//! - Subscribers that went away are dropped on the next publish
//! - Nothing blocks on, retries, or confirms delivery

use std::sync::mpsc;

pub const ITEM_ADDED_MESSAGE: &str = "Product added to cart!";
pub const ITEM_REMOVED_MESSAGE: &str = "Product removed from cart!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { product_id: String, title: String },
    ItemRemoved { product_id: String, title: String },
}

impl CartEvent {
    pub fn product_id(&self) -> &str {
        match self {
            CartEvent::ItemAdded { product_id, .. } | CartEvent::ItemRemoved { product_id, .. } => {
                product_id
            }
        }
    }

    /// Toast text shown to the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => ITEM_ADDED_MESSAGE,
            CartEvent::ItemRemoved { .. } => ITEM_REMOVED_MESSAGE,
        }
    }
}

#[derive(Debug, Default)]
pub struct NotificationBus {
    subscribers: Vec<mpsc::Sender<CartEvent>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: CartEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::Receiver<CartEvent>,
}

impl Subscription {
    pub fn try_next(&self) -> Option<CartEvent> {
        self.rx.try_recv().ok()
    }

    /// Everything published since the last drain, oldest first.
    pub fn drain(&self) -> Vec<CartEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn added(id: &str) -> CartEvent {
        CartEvent::ItemAdded {
            product_id: id.into(),
            title: "Smart Watch".into(),
        }
    }

    #[test]
    fn fan_out_to_every_subscriber() {
        let mut bus = NotificationBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(added("6"));

        assert_eq!(a.try_next(), Some(added("6")));
        assert_eq!(b.drain(), vec![added("6")]);
        assert_eq!(a.try_next(), None);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = NotificationBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(added("6"));

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.drain().len(), 1);
    }

    #[test]
    fn messages_match_operation() {
        let removed = CartEvent::ItemRemoved {
            product_id: "6".into(),
            title: "Smart Watch".into(),
        };
        assert_eq!(added("6").message(), "Product added to cart!");
        assert_eq!(removed.message(), "Product removed from cart!");
        assert_eq!(removed.product_id(), "6");
    }
}
