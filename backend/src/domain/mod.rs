//! Domain layer: models, command types and the services that implement the
//! business rules over the storage traits.

pub mod commands;
pub mod contact_service;
pub mod errors;
pub mod models;
pub mod recurring_service;
pub mod transaction_service;

pub use contact_service::ContactService;
pub use recurring_service::RecurringChargeService;
pub use transaction_service::TransactionService;
