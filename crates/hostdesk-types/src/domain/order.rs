use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::LineItem;

/// Kitchen lifecycle is pending -> preparing -> ready -> completed, with
/// cancelled reachable from anywhere. Transitions are not enforced: any
/// status may be set at any time, matching how the floor actually runs
/// (a "completed" order gets reopened when the kitchen bumped it by mistake).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

/// Caller-supplied fields of an order. Doubles as the inbound request body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub branch_id: String,
    pub branch_name: String,
    pub guest_name: String,
    pub guest_phone: String,
    #[serde(default)]
    pub table_number: Option<String>,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub branch_id: String,
    pub branch_name: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub table_number: Option<String>,
    pub items: Vec<LineItem>,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Order {
    /// The total is derived from the line items here and nowhere else.
    pub fn new(data: NewOrder) -> anyhow::Result<Self> {
        if data.guest_name.trim().is_empty() {
            anyhow::bail!("guest name empty");
        }
        if data.items.is_empty() {
            anyhow::bail!("items empty");
        }
        for it in &data.items {
            if it.quantity == 0 {
                anyhow::bail!("item quantity must be > 0");
            }
        }
        let total = data.items.iter().map(LineItem::subtotal_cents).sum();
        Ok(Self {
            id: Uuid::new_v4(),
            branch_id: data.branch_id,
            branch_name: data.branch_name,
            guest_name: data.guest_name,
            guest_phone: data.guest_phone,
            table_number: data.table_number,
            items: data.items,
            total_cents: total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            notes: data.notes,
        })
    }

    pub fn update_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32, unit_price_cents: i64) -> LineItem {
        LineItem {
            menu_item_id: name.to_lowercase(),
            name: name.into(),
            quantity,
            unit_price_cents,
        }
    }

    fn valid_order() -> NewOrder {
        NewOrder {
            branch_id: "1".into(),
            branch_name: "Downtown Branch".into(),
            guest_name: "Bob".into(),
            guest_phone: "+1 234 567 8911".into(),
            table_number: Some("3".into()),
            items: vec![item("Beef Burger", 2, 1699)],
            notes: None,
        }
    }

    #[test]
    fn new_order_computes_total_and_defaults_pending() {
        let order = Order::new(NewOrder {
            items: vec![item("A", 3, 500), item("B", 1, 200)],
            ..valid_order()
        })
        .unwrap();
        assert_eq!(order.total_cents, 1700);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn validation_errors() {
        let empty_name = Order::new(NewOrder {
            guest_name: "".into(),
            ..valid_order()
        });
        assert!(empty_name.is_err());

        let empty_items = Order::new(NewOrder {
            items: vec![],
            ..valid_order()
        });
        assert!(empty_items.is_err());

        let zero_qty = Order::new(NewOrder {
            items: vec![item("A", 0, 100)],
            ..valid_order()
        });
        assert!(zero_qty.is_err());
    }

    #[test]
    fn update_status_accepts_any_transition() {
        let mut order = Order::new(valid_order()).unwrap();
        order.update_status(OrderStatus::Completed);
        assert_eq!(order.status, OrderStatus::Completed);
        // No legality check: going backwards is accepted.
        order.update_status(OrderStatus::Pending);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn update_status_changes_only_status() {
        let mut order = Order::new(valid_order()).unwrap();
        let total = order.total_cents;
        let created_at = order.created_at;
        order.update_status(OrderStatus::Ready);
        assert_eq!(order.status, OrderStatus::Ready);
        assert_eq!(order.total_cents, total);
        assert_eq!(order.created_at, created_at);
    }

    #[test]
    fn status_serializes_lowercase() {
        let order = Order::new(valid_order()).unwrap();
        let v = serde_json::to_value(&order).unwrap();
        assert_eq!(v["status"], "pending");
    }
}
