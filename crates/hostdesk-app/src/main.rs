use hostdesk_hex::application::booking_service::BookingService;
use hostdesk_hex::application::notifications::{Notification, NotificationHub};
use hostdesk_hex::application::order_service::OrderService;
use hostdesk_hex::config::Config;
use hostdesk_hex::inbound::http::{HttpServer, HttpServerConfig};
use hostdesk_repo::{build_store, Store};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for SERVER_PORT / DATA_DIR when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    let store: Store = build_store(config.data_dir.as_deref()).await?;

    let hub = NotificationHub::new();
    let bookings = BookingService::new(store.clone(), hub.clone());
    let orders = OrderService::new(store, hub.clone());

    // Baseline staff consumer: every new booking/order lands in the log even
    // when no dashboard is subscribed.
    let mut notifications = hub.subscribe();
    tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(Notification::BookingPlaced(b)) => {
                    tracing::info!(
                        booking_id = %b.id,
                        branch = %b.branch_name,
                        guests = b.guests,
                        "new booking"
                    );
                }
                Ok(Notification::OrderPlaced(o)) => {
                    tracing::info!(
                        order_id = %o.id,
                        branch = %o.branch_name,
                        total_cents = o.total_cents,
                        "new order"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification log consumer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(bookings, orders, server_cfg).await?;
    http.run().await
}
