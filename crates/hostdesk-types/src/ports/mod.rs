pub mod booking_repository;
pub mod order_repository;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("storage error: {0}")]
    Storage(String),
}
