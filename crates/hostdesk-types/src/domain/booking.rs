use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::LineItem;

pub const MAX_PARTY_SIZE: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Caller-supplied fields of a booking. Doubles as the inbound request body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub branch_id: String,
    pub branch_name: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub branch_id: String,
    pub branch_name: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
    pub items: Vec<LineItem>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(data: NewBooking) -> anyhow::Result<Self> {
        if data.guest_name.trim().is_empty() {
            anyhow::bail!("guest name empty");
        }
        if !data.guest_email.contains('@') {
            anyhow::bail!("invalid guest email");
        }
        if data.guests == 0 || data.guests > MAX_PARTY_SIZE {
            anyhow::bail!("party size must be between 1 and {}", MAX_PARTY_SIZE);
        }
        for it in &data.items {
            if it.quantity == 0 {
                anyhow::bail!("item quantity must be > 0");
            }
        }
        Ok(Self {
            id: Uuid::new_v4(),
            branch_id: data.branch_id,
            branch_name: data.branch_name,
            guest_name: data.guest_name,
            guest_email: data.guest_email,
            guest_phone: data.guest_phone,
            date: data.date,
            time: data.time,
            guests: data.guests,
            items: data.items,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Explicit confirm/decline. The read acknowledgement never calls this.
    pub fn update_status(&mut self, status: BookingStatus) {
        self.status = status;
    }
}
