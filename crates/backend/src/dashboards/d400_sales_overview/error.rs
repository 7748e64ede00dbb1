use contracts::dashboards::d400_sales_overview::{Dimension, ViewError, ViewErrorKind};
use sea_orm::DbErr;
use thiserror::Error;

/// Errors of the sales overview dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Selected value is not among the distinct values of the dimension
    #[error("invalid value '{value}' for filter '{dimension}'")]
    InvalidFilterValue { dimension: Dimension, value: String },

    /// Data store unreachable or the statement failed
    #[error("query execution failed: {0}")]
    QueryExecution(#[from] DbErr),

    /// A measure could not be read as a number after currency stripping
    #[error("cannot convert {column} value '{value}' to a number")]
    DataConversion { column: &'static str, value: String },
}

impl DashboardError {
    /// Per-view error payload for the response
    pub fn to_view_error(&self) -> ViewError {
        let kind = match self {
            DashboardError::InvalidFilterValue { .. } => ViewErrorKind::InvalidFilter,
            DashboardError::QueryExecution(_) => ViewErrorKind::QueryExecution,
            DashboardError::DataConversion { .. } => ViewErrorKind::DataConversion,
        };
        ViewError {
            kind,
            message: self.to_string(),
        }
    }
}
