use tokio::sync::broadcast;

use hostdesk_types::domain::booking::Booking;
use hostdesk_types::domain::order::Order;

/// Comfortably above what a single evening's rush produces before any
/// subscriber falls behind.
const CHANNEL_CAPACITY: usize = 256;

/// A new record the front of house should hear about.
#[derive(Debug, Clone)]
pub enum Notification {
    BookingPlaced(Booking),
    OrderPlaced(Order),
}

/// Publish/subscribe bridge between the containers and staff-facing
/// consumers. Every subscriber sees every record published after it
/// subscribed, in publish order; a slow subscriber observes `Lagged`
/// instead of records silently overwriting one another.
#[derive(Clone)]
pub struct NotificationHub {
    tx: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Fire-and-forget: having zero subscribers is not an error.
    pub fn publish(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}
