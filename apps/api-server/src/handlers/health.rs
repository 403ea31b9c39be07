//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: database_status(&state).await,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}

async fn database_status(state: &AppState) -> &'static str {
    match &state.db {
        None => "in-memory",
        #[cfg(feature = "postgres")]
        Some(db) => match db.main.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                "unreachable"
            }
        },
        #[cfg(not(feature = "postgres"))]
        Some(_) => "in-memory",
    }
}
