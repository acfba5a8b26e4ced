use chrono::{NaiveDate, NaiveTime};
use hostdesk_hex::application::booking_service::BookingService;
use hostdesk_hex::application::notifications::{Notification, NotificationHub};
use hostdesk_hex::application::order_service::OrderService;
use hostdesk_repo::memory::InMemoryStore;
use hostdesk_types::domain::booking::{BookingStatus, NewBooking};
use hostdesk_types::domain::item::LineItem;
use hostdesk_types::domain::order::{NewOrder, OrderStatus};

fn item(name: &str, quantity: u32, unit_price_cents: i64) -> LineItem {
    LineItem {
        menu_item_id: name.to_lowercase(),
        name: name.into(),
        quantity,
        unit_price_cents,
    }
}

// The whole front-of-house evening in one flow: a booking comes in, staff
// acknowledge it, an order is placed and cooked through to ready.
#[tokio::test]
async fn booking_and_order_flow() {
    let repo = InMemoryStore::new();
    let hub = NotificationHub::new();
    let mut rx = hub.subscribe();
    let bookings = BookingService::new(repo.clone(), hub.clone());
    let orders = OrderService::new(repo, hub);

    let booking = bookings
        .create_booking(NewBooking {
            branch_id: "1".into(),
            branch_name: "Downtown Branch".into(),
            guest_name: "Eve".into(),
            guest_email: "eve@example.com".into(),
            guest_phone: "+1 234 567 8912".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            guests: 4,
            items: vec![item("Grilled Salmon", 2, 1000)],
        })
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(bookings.unread_count(), 1);

    let order = orders
        .place_order(NewOrder {
            branch_id: "1".into(),
            branch_name: "Downtown Branch".into(),
            guest_name: "Eve".into(),
            guest_phone: "+1 234 567 8912".into(),
            table_number: Some("4".into()),
            items: vec![item("Pasta Carbonara", 3, 500), item("Lava Cake", 1, 200)],
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(order.total_cents, 1700);
    assert_eq!(order.status, OrderStatus::Pending);

    // Both placements reached the subscriber, in order.
    assert!(matches!(
        rx.recv().await.unwrap(),
        Notification::BookingPlaced(b) if b.id == booking.id
    ));
    assert!(matches!(
        rx.recv().await.unwrap(),
        Notification::OrderPlaced(o) if o.id == order.id
    ));

    // Staff acknowledge the booking card; the booking itself stays pending.
    bookings.mark_read(booking.id);
    assert_eq!(bookings.unread_count(), 0);
    let fetched = bookings.get_booking(booking.id).await.unwrap();
    assert_eq!(fetched.status, BookingStatus::Pending);

    // Then confirm it explicitly.
    let confirmed = bookings
        .update_status(booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    // Kitchen works the order to ready; it drops off the pending board.
    orders
        .update_status(order.id, OrderStatus::Preparing)
        .await
        .unwrap();
    let ready = orders
        .update_status(order.id, OrderStatus::Ready)
        .await
        .unwrap();
    assert_eq!(ready.status, OrderStatus::Ready);
    assert_eq!(ready.total_cents, 1700);
    assert!(orders.pending_orders(Some("1")).await.unwrap().is_empty());
}
