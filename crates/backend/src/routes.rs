use axum::{routing::get, Router};

use crate::handlers;

/// Application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // DASHBOARDS
        // ========================================
        // D400 Superstore sales overview
        .route(
            "/api/d400/filters",
            get(handlers::d400_sales_overview::get_filters),
        )
        .route(
            "/api/d400/dashboard",
            get(handlers::d400_sales_overview::get_dashboard),
        )
}
