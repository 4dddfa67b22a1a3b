use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use finance_crm_backend::domain::{ContactService, RecurringChargeService, TransactionService};
use finance_crm_backend::rest::{self, AppState};
use finance_crm_backend::storage::sqlite::{ContactRepository, DbConnection, TransactionRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Setting up database");
    let db = DbConnection::init().await?;

    let contact_repository = Arc::new(ContactRepository::new(db.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(db));

    let contact_service = ContactService::new(contact_repository.clone());
    let transaction_service =
        TransactionService::new(transaction_repository.clone(), contact_repository.clone());
    let recurring_service =
        RecurringChargeService::new(contact_repository, transaction_repository);

    let state = AppState::new(contact_service, transaction_service, recurring_service);

    // CORS setup to allow the web client to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = rest::router(state).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
