use std::collections::BTreeMap;

use chrono::NaiveDate;
use contracts::dashboards::d400_sales_overview::{
    CategorySalesRow, Dimension, MonthlySalesRow, SegmentSalesRow, StateSalesRow, TotalsSummary,
};
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, Statement};

use super::error::DashboardError;
use super::filter::{column_ref, source_table, FilterDomain, Predicate};
use crate::shared::currency::parse_currency;

/// Rows kept by the top-N views
pub const TOP_N: usize = 5;

/// Sales fact table joined to all five dimension tables.
/// Every aggregate below uses exactly this join.
const SALES_JOIN: &str = r#"
        FROM sales s
        JOIN "Order" o ON s.orderguid = o.orderguid
        JOIN customer c ON o.customerguid = c.customerguid
        JOIN product p ON s.productguid = p.productguid
        JOIN shipping sh ON o.shippingguid = sh.shippingguid
        JOIN address a ON sh.addressguid = a.addressguid"#;

/// One row per matching sale. Amounts come back as text and are summed in
/// Rust after [`coerce_amount`], so every view reads money the same way.
fn filtered_statement(backend: DatabaseBackend, select: &str, predicate: &Predicate) -> Statement {
    let rendered = predicate.render(backend);
    let sql = format!("{}{}\n        WHERE {}", select, SALES_JOIN, rendered.sql);
    Statement::from_sql_and_values(backend, &sql, rendered.values)
}

/// Order date truncated to the first day of its month, as `YYYY-MM-DD` text
fn month_bucket(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Postgres => "TO_CHAR(DATE_TRUNC('month', o.dateordered), 'YYYY-MM-DD')",
        DatabaseBackend::Sqlite => "strftime('%Y-%m-01', o.dateordered)",
        DatabaseBackend::MySql => "DATE_FORMAT(o.dateordered, '%Y-%m-01')",
    }
}

/// Reads a measure through [`parse_currency`]. NULL counts as nothing sold.
fn coerce_amount(column: &'static str, raw: Option<String>) -> Result<f64, DashboardError> {
    match raw {
        None => Ok(0.0),
        Some(text) => match parse_currency(&text) {
            Some(value) => Ok(value),
            None => Err(DashboardError::DataConversion {
                column,
                value: text,
            }),
        },
    }
}

/// Adds up coerced amounts per key
fn sum_by_key<K, I>(column: &'static str, rows: I) -> Result<BTreeMap<K, f64>, DashboardError>
where
    K: Ord,
    I: IntoIterator<Item = (K, Option<String>)>,
{
    let mut totals = BTreeMap::new();
    for (key, raw) in rows {
        let amount = coerce_amount(column, raw)?;
        *totals.entry(key).or_insert(0.0) += amount;
    }
    Ok(totals)
}

/// Sales per calendar month of the order date, oldest month first
pub async fn monthly_sales<C>(
    db: &C,
    predicate: &Predicate,
) -> Result<Vec<MonthlySalesRow>, DashboardError>
where
    C: ConnectionTrait,
{
    #[derive(Debug, FromQueryResult)]
    struct MonthMeasure {
        month: Option<String>,
        sales: Option<String>,
    }

    let backend = db.get_database_backend();
    let select = format!(
        "\n        SELECT {} AS month, CAST(s.sales AS TEXT) AS sales",
        month_bucket(backend)
    );
    let stmt = filtered_statement(backend, &select, predicate);
    let results = MonthMeasure::find_by_statement(stmt).all(db).await?;

    let mut undated = 0usize;
    let mut dated = Vec::with_capacity(results.len());
    for r in results {
        let Some(month) = r.month else {
            undated += 1;
            continue;
        };
        let month = NaiveDate::parse_from_str(&month, "%Y-%m-%d").map_err(|_| {
            DashboardError::DataConversion {
                column: "month",
                value: month.clone(),
            }
        })?;
        dated.push((month, r.sales));
    }
    if undated > 0 {
        tracing::warn!(
            "D400: {} sales without an order date left out of the monthly series",
            undated
        );
    }

    Ok(sum_by_key("sales", dated)?
        .into_iter()
        .map(|(month, total_sales)| MonthlySalesRow { month, total_sales })
        .collect())
}

/// Top [`TOP_N`] values of a dimension by summed sales, largest first.
/// Equal totals keep label order.
async fn top_by_sales<C>(
    db: &C,
    predicate: &Predicate,
    dimension: Dimension,
) -> Result<Vec<(String, f64)>, DashboardError>
where
    C: ConnectionTrait,
{
    #[derive(Debug, FromQueryResult)]
    struct LabelMeasure {
        label: Option<String>,
        sales: Option<String>,
    }

    let (alias, column) = column_ref(dimension);
    let select =
        format!("\n        SELECT {alias}.{column} AS label, CAST(s.sales AS TEXT) AS sales");

    let backend = db.get_database_backend();
    let stmt = filtered_statement(backend, &select, predicate);
    let results = LabelMeasure::find_by_statement(stmt).all(db).await?;

    let totals = sum_by_key(
        "sales",
        results
            .into_iter()
            .map(|r| (r.label.unwrap_or_default(), r.sales)),
    )?;

    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    // stable sort: ties stay in label order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(TOP_N);
    Ok(ranked)
}

/// Top five product categories by sales
pub async fn top_categories_by_sales<C>(
    db: &C,
    predicate: &Predicate,
) -> Result<Vec<CategorySalesRow>, DashboardError>
where
    C: ConnectionTrait,
{
    let rows = top_by_sales(db, predicate, Dimension::Category).await?;
    Ok(rows
        .into_iter()
        .map(|(category, total_sales)| CategorySalesRow {
            category,
            total_sales,
        })
        .collect())
}

/// Top five customer segments by sales
pub async fn top_segments_by_sales<C>(
    db: &C,
    predicate: &Predicate,
) -> Result<Vec<SegmentSalesRow>, DashboardError>
where
    C: ConnectionTrait,
{
    let rows = top_by_sales(db, predicate, Dimension::Segment).await?;
    Ok(rows
        .into_iter()
        .map(|(segment, total_sales)| SegmentSalesRow {
            segment,
            total_sales,
        })
        .collect())
}

/// Sales per state code
pub async fn sales_by_state_code<C>(
    db: &C,
    predicate: &Predicate,
) -> Result<Vec<StateSalesRow>, DashboardError>
where
    C: ConnectionTrait,
{
    #[derive(Debug, FromQueryResult)]
    struct StateMeasure {
        state_code: Option<String>,
        sales: Option<String>,
    }

    let select = "\n        SELECT a.state_code AS state_code, CAST(s.sales AS TEXT) AS sales";
    let backend = db.get_database_backend();
    let stmt = filtered_statement(backend, select, predicate);
    let results = StateMeasure::find_by_statement(stmt).all(db).await?;

    let totals = sum_by_key(
        "sales",
        results
            .into_iter()
            .map(|r| (r.state_code.unwrap_or_default(), r.sales)),
    )?;

    Ok(totals
        .into_iter()
        .map(|(state_code, total_sales)| StateSalesRow {
            state_code,
            total_sales,
        })
        .collect())
}

/// Total sales and profit; `(0, 0)` when nothing matches
pub async fn totals_summary<C>(db: &C, predicate: &Predicate) -> Result<TotalsSummary, DashboardError>
where
    C: ConnectionTrait,
{
    #[derive(Debug, FromQueryResult)]
    struct Measures {
        sales: Option<String>,
        profit: Option<String>,
    }

    let select =
        "\n        SELECT CAST(s.sales AS TEXT) AS sales, CAST(s.profit AS TEXT) AS profit";
    let backend = db.get_database_backend();
    let stmt = filtered_statement(backend, select, predicate);
    let results = Measures::find_by_statement(stmt).all(db).await?;

    let mut summary = TotalsSummary::default();
    for r in results {
        summary.total_sales += coerce_amount("sales", r.sales)?;
        summary.total_profit += coerce_amount("profit", r.profit)?;
    }

    Ok(summary)
}

/// Distinct non-NULL values of every dimension, sorted
pub async fn load_filter_domain<C>(db: &C) -> Result<FilterDomain, DashboardError>
where
    C: ConnectionTrait,
{
    #[derive(Debug, FromQueryResult)]
    struct DistinctValue {
        option_value: String,
    }

    let backend = db.get_database_backend();
    let mut domain = FilterDomain::new();

    for dimension in Dimension::all() {
        let (_, column) = column_ref(dimension);
        let sql = format!(
            "SELECT DISTINCT {column} AS option_value FROM {table} WHERE {column} IS NOT NULL ORDER BY option_value",
            column = column,
            table = source_table(dimension),
        );
        let values = DistinctValue::find_by_statement(Statement::from_string(backend, sql))
            .all(db)
            .await?
            .into_iter()
            .map(|v| v.option_value)
            .collect();
        domain.insert(dimension, values);
    }

    Ok(domain)
}
