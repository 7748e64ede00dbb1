use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_sales_overview::{
    ErrorResponse, FilterOptions, FilterSelection, SalesDashboardResponse,
};

use crate::dashboards::d400_sales_overview::{service, DashboardError};
use crate::shared::data::db::get_connection;

/// GET /api/d400/filters
pub async fn get_filters() -> Result<Json<FilterOptions>, StatusCode> {
    match service::get_filter_options(get_connection()).await {
        Ok(options) => Ok(Json(options)),
        Err(e) => {
            tracing::error!("Failed to load D400 filter options: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d400/dashboard?segment=..&region=..
pub async fn get_dashboard(
    Query(selection): Query<FilterSelection>,
) -> Result<Json<SalesDashboardResponse>, (StatusCode, Json<ErrorResponse>)> {
    let db = get_connection();

    let filters = match service::resolve_filters(db, &selection).await {
        Ok(filters) => filters,
        Err(e @ DashboardError::InvalidFilterValue { .. }) => {
            tracing::warn!("Rejected D400 filters: {}", e);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ));
        }
        Err(e) => {
            tracing::error!("Failed to resolve D400 filters: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "failed to load filter values".to_string(),
                }),
            ));
        }
    };

    Ok(Json(service::build_dashboard(db, &filters).await))
}
