//! Domain models shared by the services.

pub mod contact;
pub mod transaction;
