use uuid::Uuid;

use crate::application::notifications::{Notification, NotificationHub};
use crate::errors::AppError;
use hostdesk_types::domain::order::{NewOrder, Order, OrderStatus};
use hostdesk_types::ports::order_repository::OrderRepository;

/// The order container. Placement publishes on the hub so staff dashboards
/// hear about every order, not just the last one written.
pub struct OrderService<R: OrderRepository> {
    repo: R,
    hub: NotificationHub,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R, hub: NotificationHub) -> Self {
        Self { repo, hub }
    }

    pub async fn place_order(&self, data: NewOrder) -> Result<Order, AppError> {
        let order = Order::new(data).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let order = self
            .repo
            .add(order)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
        self.hub.publish(Notification::OrderPlaced(order.clone()));
        Ok(order)
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order, AppError> {
        match self
            .repo
            .get(id)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        self.repo
            .list()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub async fn orders_by_branch(&self, branch_id: Option<&str>) -> Result<Vec<Order>, AppError> {
        self.repo
            .by_branch(branch_id)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub async fn pending_orders(&self, branch_id: Option<&str>) -> Result<Vec<Order>, AppError> {
        self.repo
            .pending(branch_id)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    /// Transitions are not validated: the kitchen may move an order to any
    /// status at any time.
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, AppError> {
        match self
            .repo
            .update_status(id, status)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }
}
