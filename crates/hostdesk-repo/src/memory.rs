use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use hostdesk_types::domain::booking::{Booking, BookingStatus};
use hostdesk_types::domain::order::{Order, OrderStatus};
use hostdesk_types::ports::booking_repository::BookingRepository;
use hostdesk_types::ports::order_repository::OrderRepository;
use hostdesk_types::ports::RepoError;

/// Volatile adapter. Both containers are plain vectors with new records at
/// the front, so listings come out newest first without sorting.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    bookings: Arc<RwLock<Vec<Booking>>>,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn add(&self, booking: Booking) -> Result<Booking, RepoError> {
        let mut bookings = self.bookings.write().await;
        bookings.insert(0, booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Booking>, RepoError> {
        Ok(self.bookings.read().await.clone())
    }

    async fn by_branch(&self, branch_id: &str) -> Result<Vec<Booking>, RepoError> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| b.branch_id == branch_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepoError> {
        let mut bookings = self.bookings.write().await;
        if let Some(b) = bookings.iter_mut().find(|b| b.id == id) {
            b.update_status(status);
            return Ok(Some(b.clone()));
        }
        Ok(None)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn add(&self, order: Order) -> Result<Order, RepoError> {
        let mut orders = self.orders.write().await;
        orders.insert(0, order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        Ok(self.orders.read().await.clone())
    }

    async fn by_branch(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| branch_id.is_none_or(|b| o.branch_id == b))
            .cloned()
            .collect())
    }

    async fn pending(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .filter(|o| branch_id.is_none_or(|b| o.branch_id == b))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError> {
        let mut orders = self.orders.write().await;
        if let Some(o) = orders.iter_mut().find(|o| o.id == id) {
            o.update_status(status);
            return Ok(Some(o.clone()));
        }
        Ok(None)
    }
}
