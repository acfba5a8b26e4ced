use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::application::notifications::{Notification, NotificationHub};
use crate::errors::AppError;
use hostdesk_types::domain::booking::{Booking, BookingStatus, NewBooking};
use hostdesk_types::ports::booking_repository::BookingRepository;

/// The booking container. Owns the unread badge counter, which counts
/// acknowledgements only and is never persisted: the badge resets with the
/// process, not with the stored bookings.
pub struct BookingService<R: BookingRepository> {
    repo: R,
    hub: NotificationHub,
    unread: AtomicUsize,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repo: R, hub: NotificationHub) -> Self {
        Self {
            repo,
            hub,
            unread: AtomicUsize::new(0),
        }
    }

    pub async fn create_booking(&self, data: NewBooking) -> Result<Booking, AppError> {
        let booking = Booking::new(data).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let booking = self
            .repo
            .add(booking)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
        self.unread.fetch_add(1, Ordering::Relaxed);
        self.hub
            .publish(Notification::BookingPlaced(booking.clone()));
        Ok(booking)
    }

    /// Acknowledge one booking card on the staff dashboard. Display-only:
    /// the booking's status is untouched, and the counter floors at zero.
    /// Returns the counter after the decrement.
    pub fn mark_read(&self, _booking_id: Uuid) -> usize {
        self.unread
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                Some(n.saturating_sub(1))
            })
            .map(|prev| prev.saturating_sub(1))
            .unwrap_or(0)
    }

    pub fn unread_count(&self) -> usize {
        self.unread.load(Ordering::Relaxed)
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Booking, AppError> {
        match self
            .repo
            .get(id)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        {
            Some(b) => Ok(b),
            None => Err(AppError::NotFound(format!("booking {}", id))),
        }
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, AppError> {
        self.repo
            .list()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub async fn bookings_by_branch(&self, branch_id: &str) -> Result<Vec<Booking>, AppError> {
        self.repo
            .by_branch(branch_id)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    /// The explicit confirm/decline action. Separate from `mark_read`, and
    /// transitions are not validated.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        match self
            .repo
            .update_status(id, status)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        {
            Some(b) => Ok(b),
            None => Err(AppError::NotFound(format!("booking {}", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use hostdesk_repo::memory::InMemoryStore;
    use hostdesk_types::domain::item::LineItem;

    fn new_booking(branch_id: &str) -> NewBooking {
        NewBooking {
            branch_id: branch_id.into(),
            branch_name: "Downtown Branch".into(),
            guest_name: "Alice".into(),
            guest_email: "alice@example.com".into(),
            guest_phone: "+1 234 567 8910".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            guests: 4,
            items: vec![LineItem {
                menu_item_id: "1".into(),
                name: "Grilled Salmon".into(),
                quantity: 2,
                unit_price_cents: 1000,
            }],
        }
    }

    fn service() -> BookingService<InMemoryStore> {
        BookingService::new(InMemoryStore::new(), NotificationHub::new())
    }

    #[tokio::test]
    async fn create_increments_count_and_unread_by_one() {
        let svc = service();
        assert_eq!(svc.unread_count(), 0);

        let booking = svc.create_booking(new_booking("1")).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(svc.list_bookings().await.unwrap().len(), 1);
        assert_eq!(svc.unread_count(), 1);

        svc.create_booking(new_booking("1")).await.unwrap();
        assert_eq!(svc.list_bookings().await.unwrap().len(), 2);
        assert_eq!(svc.unread_count(), 2);
    }

    #[tokio::test]
    async fn mark_read_floors_at_zero() {
        let svc = service();
        let booking = svc.create_booking(new_booking("1")).await.unwrap();
        assert_eq!(svc.unread_count(), 1);

        assert_eq!(svc.mark_read(booking.id), 0);
        // More acknowledgements than bookings: the counter stays at zero.
        assert_eq!(svc.mark_read(booking.id), 0);
        assert_eq!(svc.mark_read(Uuid::new_v4()), 0);
        assert_eq!(svc.unread_count(), 0);
    }

    #[tokio::test]
    async fn mark_read_leaves_status_pending() {
        let svc = service();
        let booking = svc.create_booking(new_booking("1")).await.unwrap();
        svc.mark_read(booking.id);

        let fetched = svc.get_booking(booking.id).await.unwrap();
        assert_eq!(fetched.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn by_branch_preserves_newest_first() {
        let svc = service();
        let downtown = svc.create_booking(new_booking("1")).await.unwrap();
        svc.create_booking(new_booking("2")).await.unwrap();
        let downtown_later = svc.create_booking(new_booking("1")).await.unwrap();

        let found = svc.bookings_by_branch("1").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, downtown_later.id);
        assert_eq!(found[1].id, downtown.id);

        assert!(svc.bookings_by_branch("99").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirm_is_separate_from_mark_read() {
        let svc = service();
        let booking = svc.create_booking(new_booking("1")).await.unwrap();

        let confirmed = svc
            .update_status(booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        // Confirming does not acknowledge the badge.
        assert_eq!(svc.unread_count(), 1);
    }

    #[tokio::test]
    async fn validation_and_not_found_paths() {
        let svc = service();
        let bad = svc
            .create_booking(NewBooking {
                guests: 0,
                ..new_booking("1")
            })
            .await;
        assert!(matches!(bad, Err(AppError::BadRequest(_))));

        let missing = svc.get_booking(Uuid::new_v4()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let updated = svc
            .update_status(Uuid::new_v4(), BookingStatus::Cancelled)
            .await;
        assert!(matches!(updated, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_publishes_a_notification() {
        let repo = InMemoryStore::new();
        let hub = NotificationHub::new();
        let mut rx = hub.subscribe();
        let svc = BookingService::new(repo, hub);

        let booking = svc.create_booking(new_booking("1")).await.unwrap();
        let Notification::BookingPlaced(got) = rx.recv().await.unwrap() else {
            panic!("expected a booking notification");
        };
        assert_eq!(got.id, booking.id);
    }
}
