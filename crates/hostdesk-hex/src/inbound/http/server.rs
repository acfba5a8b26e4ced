use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    serve, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::booking_service::BookingService;
use crate::application::order_service::OrderService;
use crate::errors::AppError;
use hostdesk_types::domain::booking::{Booking, BookingStatus, NewBooking};
use hostdesk_types::domain::order::{NewOrder, Order, OrderStatus};
use hostdesk_types::ports::booking_repository::BookingRepository;
use hostdesk_types::ports::order_repository::OrderRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

pub struct HttpServer<R>
where
    R: BookingRepository + OrderRepository,
{
    pub state: AppState<R>,
    pub config: HttpServerConfig,
}

/// Both containers, shared with every handler.
pub struct AppState<R>
where
    R: BookingRepository + OrderRepository,
{
    pub bookings: Arc<BookingService<R>>,
    pub orders: Arc<OrderService<R>>,
}

impl<R> Clone for AppState<R>
where
    R: BookingRepository + OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            bookings: self.bookings.clone(),
            orders: self.orders.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct BranchQuery {
    pub branch_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Serialize)]
struct CreateBookingResponse {
    id: String,
    status: BookingStatus,
}

impl From<Booking> for CreateBookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id.to_string(),
            status: b.status,
        }
    }
}

#[derive(Serialize)]
struct PlaceOrderResponse {
    id: String,
    status: OrderStatus,
    total_cents: i64,
}

impl From<Order> for PlaceOrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id.to_string(),
            status: o.status,
            total_cents: o.total_cents,
        }
    }
}

#[derive(Serialize)]
struct UnreadResponse {
    count: usize,
}

impl<R> HttpServer<R>
where
    R: BookingRepository + OrderRepository,
{
    pub async fn new(
        bookings: BookingService<R>,
        orders: OrderService<R>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState {
                bookings: Arc::new(bookings),
                orders: Arc::new(orders),
            },
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let app = Router::new()
            .route("/health", get(health))
            .route("/bookings", post(create_booking::<R>))
            .route("/bookings", get(list_bookings::<R>))
            .route("/bookings/unread", get(unread_count::<R>))
            .route("/bookings/{id}", get(get_booking::<R>))
            .route("/bookings/{id}/read", post(mark_read::<R>))
            .route("/bookings/{id}/status", patch(update_booking_status::<R>))
            .route("/orders", post(place_order::<R>))
            .route("/orders", get(list_orders::<R>))
            .route("/orders/pending", get(pending_orders::<R>))
            .route("/orders/{id}", get(get_order::<R>))
            .route("/orders/{id}/status", patch(update_order_status::<R>))
            .layer(trace_layer)
            .with_state(self.state);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn create_booking<R>(
    State(state): State<AppState<R>>,
    Json(payload): Json<NewBooking>,
) -> Result<(axum::http::StatusCode, Json<CreateBookingResponse>), AppError>
where
    R: BookingRepository + OrderRepository,
{
    let booking = state.bookings.create_booking(payload).await?;
    let body: CreateBookingResponse = booking.into();
    Ok((axum::http::StatusCode::CREATED, Json(body)))
}

async fn list_bookings<R>(
    State(state): State<AppState<R>>,
    Query(query): Query<BranchQuery>,
) -> Result<Json<Vec<Booking>>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let list = match query.branch_id.as_deref() {
        Some(branch_id) => state.bookings.bookings_by_branch(branch_id).await?,
        None => state.bookings.list_bookings().await?,
    };
    Ok(Json(list))
}

async fn get_booking<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let booking = state.bookings.get_booking(parse_id(&id)?).await?;
    Ok(Json(booking))
}

async fn unread_count<R>(State(state): State<AppState<R>>) -> Json<UnreadResponse>
where
    R: BookingRepository + OrderRepository,
{
    Json(UnreadResponse {
        count: state.bookings.unread_count(),
    })
}

async fn mark_read<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<UnreadResponse>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let count = state.bookings.mark_read(parse_id(&id)?);
    Ok(Json(UnreadResponse { count }))
}

async fn update_booking_status<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let updated = state
        .bookings
        .update_status(parse_id(&id)?, payload.status)
        .await?;
    Ok(Json(updated))
}

async fn place_order<R>(
    State(state): State<AppState<R>>,
    Json(payload): Json<NewOrder>,
) -> Result<(axum::http::StatusCode, Json<PlaceOrderResponse>), AppError>
where
    R: BookingRepository + OrderRepository,
{
    let order = state.orders.place_order(payload).await?;
    let body: PlaceOrderResponse = order.into();
    Ok((axum::http::StatusCode::CREATED, Json(body)))
}

async fn list_orders<R>(
    State(state): State<AppState<R>>,
    Query(query): Query<BranchQuery>,
) -> Result<Json<Vec<Order>>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let list = state
        .orders
        .orders_by_branch(query.branch_id.as_deref())
        .await?;
    Ok(Json(list))
}

async fn pending_orders<R>(
    State(state): State<AppState<R>>,
    Query(query): Query<BranchQuery>,
) -> Result<Json<Vec<Order>>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let list = state
        .orders
        .pending_orders(query.branch_id.as_deref())
        .await?;
    Ok(Json(list))
}

async fn get_order<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let order = state.orders.get_order(parse_id(&id)?).await?;
    Ok(Json(order))
}

async fn update_order_status<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, AppError>
where
    R: BookingRepository + OrderRepository,
{
    let updated = state
        .orders
        .update_status(parse_id(&id)?, payload.status)
        .await?;
    Ok(Json(updated))
}
