use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use hostdesk_types::domain::booking::{Booking, BookingStatus};
use hostdesk_types::domain::order::{Order, OrderStatus};
use hostdesk_types::ports::booking_repository::BookingRepository;
use hostdesk_types::ports::order_repository::OrderRepository;
use hostdesk_types::ports::RepoError;

/// Named keys in the data directory, one JSON array file per key.
pub const BOOKINGS_KEY: &str = "bookings";
pub const ORDERS_KEY: &str = "orders";

/// Durable adapter. Records live in memory between writes; every mutation
/// rewrites the owning key's whole file, newest record first. A missing file
/// reads as the empty list. Malformed content fails `open` instead of being
/// silently replaced.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<Inner>,
}

struct Inner {
    dir: PathBuf,
    bookings: RwLock<Vec<Booking>>,
    orders: RwLock<Vec<Order>>,
}

impl JsonStore {
    pub async fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        let bookings = load_key(&dir, BOOKINGS_KEY).await?;
        let orders = load_key(&dir, ORDERS_KEY).await?;
        Ok(Self {
            inner: Arc::new(Inner {
                dir,
                bookings: RwLock::new(bookings),
                orders: RwLock::new(orders),
            }),
        })
    }
}

fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

async fn load_key<T: DeserializeOwned>(dir: &Path, key: &str) -> anyhow::Result<Vec<T>> {
    match tokio::fs::read(key_path(dir, key)).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn save_key<T: Serialize>(dir: &Path, key: &str, records: &[T]) -> Result<(), RepoError> {
    let bytes =
        serde_json::to_vec_pretty(records).map_err(|e| RepoError::Storage(e.to_string()))?;
    tokio::fs::write(key_path(dir, key), bytes)
        .await
        .map_err(|e| RepoError::Storage(e.to_string()))
}

#[async_trait]
impl BookingRepository for JsonStore {
    async fn add(&self, booking: Booking) -> Result<Booking, RepoError> {
        let mut bookings = self.inner.bookings.write().await;
        bookings.insert(0, booking.clone());
        save_key(&self.inner.dir, BOOKINGS_KEY, bookings.as_slice()).await?;
        Ok(booking)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        let bookings = self.inner.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Booking>, RepoError> {
        Ok(self.inner.bookings.read().await.clone())
    }

    async fn by_branch(&self, branch_id: &str) -> Result<Vec<Booking>, RepoError> {
        let bookings = self.inner.bookings.read().await;
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
        let mut bookings = self.inner.bookings.write().await;
        if let Some(b) = bookings.iter_mut().find(|b| b.id == id) {
            b.update_status(status);
            let updated = b.clone();
            save_key(&self.inner.dir, BOOKINGS_KEY, bookings.as_slice()).await?;
            return Ok(Some(updated));
        }
        Ok(None)
    }
}

#[async_trait]
impl OrderRepository for JsonStore {
    async fn add(&self, order: Order) -> Result<Order, RepoError> {
        let mut orders = self.inner.orders.write().await;
        orders.insert(0, order.clone());
        save_key(&self.inner.dir, ORDERS_KEY, orders.as_slice()).await?;
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        let orders = self.inner.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        Ok(self.inner.orders.read().await.clone())
    }

    async fn by_branch(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        let orders = self.inner.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| branch_id.is_none_or(|b| o.branch_id == b))
            .cloned()
            .collect())
    }

    async fn pending(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        let orders = self.inner.orders.read().await;
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
        let mut orders = self.inner.orders.write().await;
        if let Some(o) = orders.iter_mut().find(|o| o.id == id) {
            o.update_status(status);
            let updated = o.clone();
            save_key(&self.inner.dir, ORDERS_KEY, orders.as_slice()).await?;
            return Ok(Some(updated));
        }
        Ok(None)
    }
}
