pub mod booking_service;
pub mod notifications;
pub mod order_service;
