use crate::services::TaxRecordService;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod database;
pub mod domain;
pub mod features;
pub mod loader;
pub mod logging;
pub mod services;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub tax_service: Arc<TaxRecordService>,
}

/// The full HTTP surface, ready to be served.
pub fn app(state: AppState) -> Router {
    features::tax_records::tax_records_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
