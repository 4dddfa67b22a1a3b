//! SQLite storage backend.

pub mod connection;
pub mod contact_repository;
pub mod transaction_repository;

pub use connection::DbConnection;
pub use contact_repository::ContactRepository;
pub use transaction_repository::TransactionRepository;
