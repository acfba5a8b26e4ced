use async_trait::async_trait;
use uuid::Uuid;

use super::RepoError;
use crate::domain::order::{Order, OrderStatus};

/// Order container port. Branch filters take `None` to mean "all branches".
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn add(&self, order: Order) -> Result<Order, RepoError>;
    async fn get(&self, id: Uuid) -> Result<Option<Order>, RepoError>;
    async fn list(&self) -> Result<Vec<Order>, RepoError>;
    async fn by_branch(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError>;
    async fn pending(&self, branch_id: Option<&str>) -> Result<Vec<Order>, RepoError>;
    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError>;
}
