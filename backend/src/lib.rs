//! Personal finance / CRM backend.
//!
//! Users manage contacts (companies or individual clients), record income and
//! expense transactions linked to those contacts, and view monthly summaries.
//! Contacts may carry a recurring monthly charge; the generator in
//! [`domain::recurring_service`] materializes one income transaction per
//! contact and month once the charge's launch day has passed.

pub mod domain;
pub mod rest;
pub mod storage;
