use async_trait::async_trait;
use uuid::Uuid;

use super::RepoError;
use crate::domain::booking::{Booking, BookingStatus};

/// Booking container port. `add` prepends, so `list` and `by_branch` return
/// records newest first.
#[async_trait]
pub trait BookingRepository: Send + Sync + 'static {
    async fn add(&self, booking: Booking) -> Result<Booking, RepoError>;
    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepoError>;
    async fn list(&self) -> Result<Vec<Booking>, RepoError>;
    async fn by_branch(&self, branch_id: &str) -> Result<Vec<Booking>, RepoError>;
    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepoError>;
}
