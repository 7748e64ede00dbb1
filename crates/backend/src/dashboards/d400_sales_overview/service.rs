use contracts::dashboards::d400_sales_overview::{
    DashboardView, FilterOptions, FilterSelection, KeyMetrics, SalesDashboardResponse,
    TotalsSummary,
};
use sea_orm::ConnectionTrait;

use super::error::DashboardError;
use super::filter::FilterModel;
use super::repository;
use crate::shared::format::format_money;

/// Filter sidebar choices
pub async fn get_filter_options<C>(db: &C) -> Result<FilterOptions, DashboardError>
where
    C: ConnectionTrait,
{
    let domain = repository::load_filter_domain(db).await?;
    Ok(domain.to_options())
}

/// Validates a client selection against the values present in the store
pub async fn resolve_filters<C>(
    db: &C,
    selection: &FilterSelection,
) -> Result<FilterModel, DashboardError>
where
    C: ConnectionTrait,
{
    let domain = repository::load_filter_domain(db).await?;
    FilterModel::from_selection(domain, selection)
}

/// Runs all five views for the current filters.
///
/// Views run one after another; a failing view is reported in its slot and
/// the remaining views still run.
pub async fn build_dashboard<C>(db: &C, filters: &FilterModel) -> SalesDashboardResponse
where
    C: ConnectionTrait,
{
    let predicate = filters.to_predicate();
    tracing::info!(
        "D400: building dashboard WHERE {} {:?}",
        predicate.render(db.get_database_backend()).sql,
        predicate.bound_values()
    );

    let key_metrics = into_view(
        "key_metrics",
        repository::totals_summary(db, &predicate)
            .await
            .map(key_metrics),
    );
    let sales_by_state = into_view(
        "sales_by_state",
        repository::sales_by_state_code(db, &predicate).await,
    );
    let top_categories = into_view(
        "top_categories",
        repository::top_categories_by_sales(db, &predicate).await,
    );
    let monthly_sales = into_view(
        "monthly_sales",
        repository::monthly_sales(db, &predicate).await,
    );
    let top_segments = into_view(
        "top_segments",
        repository::top_segments_by_sales(db, &predicate).await,
    );

    SalesDashboardResponse {
        filters: filters.selection(),
        key_metrics,
        sales_by_state,
        top_categories,
        monthly_sales,
        top_segments,
    }
}

fn key_metrics(totals: TotalsSummary) -> KeyMetrics {
    KeyMetrics {
        total_sales_display: format_money(totals.total_sales),
        total_profit_display: format_money(totals.total_profit),
        totals,
    }
}

fn into_view<T>(view: &'static str, result: Result<T, DashboardError>) -> DashboardView<T> {
    match result {
        Ok(data) => DashboardView::Ready { data },
        Err(e) => {
            tracing::error!("D400: view '{}' failed: {}", view, e);
            DashboardView::Failed {
                error: e.to_view_error(),
            }
        }
    }
}
