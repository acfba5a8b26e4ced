#[cfg(not(any(feature = "memory", feature = "json")))]
compile_error!("Enable a store feature: `memory` or `json`.");

use async_trait::async_trait;
use uuid::Uuid;

use hostdesk_types::domain::booking::{Booking, BookingStatus};
use hostdesk_types::domain::order::{Order, OrderStatus};
use hostdesk_types::ports::booking_repository::BookingRepository;
use hostdesk_types::ports::order_repository::OrderRepository;
use hostdesk_types::ports::RepoError;

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "memory")]
pub mod memory;

/// Feature-selected store behind both repository ports. When both backends
/// are compiled in, the durable one wins.
#[derive(Clone)]
pub struct Store {
    #[cfg(all(feature = "memory", not(feature = "json")))]
    memory: memory::InMemoryStore,
    #[cfg(feature = "json")]
    json: json::JsonStore,
}

pub async fn build_store(data_dir: Option<&str>) -> anyhow::Result<Store> {
    Store::build_store(data_dir).await
}

impl Store {
    #[cfg(all(feature = "memory", not(feature = "json")))]
    pub async fn build_store(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            memory: memory::InMemoryStore::new(),
        })
    }

    #[cfg(feature = "json")]
    pub async fn build_store(data_dir: Option<&str>) -> anyhow::Result<Self> {
        let dir = data_dir.unwrap_or("hostdesk-data");
        Ok(Self {
            json: json::JsonStore::open(dir).await?,
        })
    }
}

// The backends implement both ports with same-named methods, so delegation
// uses qualified calls throughout.

#[cfg(all(feature = "memory", not(feature = "json")))]
#[async_trait]
impl BookingRepository for Store {
    async fn add(&self, booking: Booking) -> Result<Booking, RepoError> {
        BookingRepository::add(&self.memory, booking).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        BookingRepository::get(&self.memory, id).await
    }

    async fn list(&self) -> Result<Vec<Booking>, RepoError> {
        BookingRepository::list(&self.memory).await
    }

    async fn by_branch(&self, branch_id: &str) -> Result<Vec<Booking>, RepoError> {
        BookingRepository::by_branch(&self.memory, branch_id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepoError> {
        BookingRepository::update_status(&self.memory, id, status).await
    }
}

#[cfg(all(feature = "memory", not(feature = "json")))]
#[async_trait]
impl OrderRepository for Store {
    async fn add(&self, order: Order) -> Result<Order, RepoError> {
        OrderRepository::add(&self.memory, order).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        OrderRepository::get(&self.memory, id).await
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        OrderRepository::list(&self.memory).await
    }

    async fn by_branch(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        OrderRepository::by_branch(&self.memory, branch_id).await
    }

    async fn pending(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        self.memory.pending(branch_id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError> {
        OrderRepository::update_status(&self.memory, id, status).await
    }
}

#[cfg(feature = "json")]
#[async_trait]
impl BookingRepository for Store {
    async fn add(&self, booking: Booking) -> Result<Booking, RepoError> {
        BookingRepository::add(&self.json, booking).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        BookingRepository::get(&self.json, id).await
    }

    async fn list(&self) -> Result<Vec<Booking>, RepoError> {
        BookingRepository::list(&self.json).await
    }

    async fn by_branch(&self, branch_id: &str) -> Result<Vec<Booking>, RepoError> {
        BookingRepository::by_branch(&self.json, branch_id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepoError> {
        BookingRepository::update_status(&self.json, id, status).await
    }
}

#[cfg(feature = "json")]
#[async_trait]
impl OrderRepository for Store {
    async fn add(&self, order: Order) -> Result<Order, RepoError> {
        OrderRepository::add(&self.json, order).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        OrderRepository::get(&self.json, id).await
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        OrderRepository::list(&self.json).await
    }

    async fn by_branch(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        OrderRepository::by_branch(&self.json, branch_id).await
    }

    async fn pending(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError> {
        self.json.pending(branch_id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError> {
        OrderRepository::update_status(&self.json, id, status).await
    }
}
