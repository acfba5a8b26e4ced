use serde::{Deserialize, Serialize};

/// A menu line on a booking or an order. `menu_item_id` points into the
/// external menu catalogue; the name and price are snapshotted at selection
/// time so later menu edits do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl LineItem {
    pub fn subtotal_cents(&self) -> i64 {
        (self.quantity as i64) * self.unit_price_cents
    }
}
