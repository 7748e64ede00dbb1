use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Widget value meaning "no constraint" for a dimension
pub const ALL: &str = "ALL";

/// Filterable axis of the sales dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Segment,
    Category,
    Subcategory,
    Region,
    Priority,
    ShipMode,
    StateProvince,
}

impl Dimension {
    /// All dimensions in canonical (predicate) order
    pub fn all() -> [Dimension; 7] {
        [
            Dimension::Segment,
            Dimension::Category,
            Dimension::Subcategory,
            Dimension::Region,
            Dimension::Priority,
            Dimension::ShipMode,
            Dimension::StateProvince,
        ]
    }

    /// Query-string key
    pub fn code(&self) -> &'static str {
        match self {
            Dimension::Segment => "segment",
            Dimension::Category => "category",
            Dimension::Subcategory => "subcategory",
            Dimension::Region => "region",
            Dimension::Priority => "priority",
            Dimension::ShipMode => "ship_mode",
            Dimension::StateProvince => "state_province",
        }
    }

    /// Widget caption
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Segment => "Customer Segment",
            Dimension::Category => "Product Category",
            Dimension::Subcategory => "Product Subcategory",
            Dimension::Region => "Region",
            Dimension::Priority => "Order Priority",
            Dimension::ShipMode => "Shipping Mode",
            Dimension::StateProvince => "State/Province",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw filter selection as sent by the client.
///
/// `None`, an empty string and [`ALL`] all mean "not filtered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub segment: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub region: Option<String>,
    pub priority: Option<String>,
    pub ship_mode: Option<String>,
    pub state_province: Option<String>,
}

impl FilterSelection {
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.slot(dimension).as_deref()
    }

    /// Builder-style setter
    pub fn with(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        *self.slot_mut(dimension) = Some(value.into());
        self
    }

    /// Every dimension with its raw value, in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (Dimension, Option<&str>)> + '_ {
        Dimension::all().into_iter().map(move |d| (d, self.get(d)))
    }

    fn slot(&self, dimension: Dimension) -> &Option<String> {
        match dimension {
            Dimension::Segment => &self.segment,
            Dimension::Category => &self.category,
            Dimension::Subcategory => &self.subcategory,
            Dimension::Region => &self.region,
            Dimension::Priority => &self.priority,
            Dimension::ShipMode => &self.ship_mode,
            Dimension::StateProvince => &self.state_province,
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<String> {
        match dimension {
            Dimension::Segment => &mut self.segment,
            Dimension::Category => &mut self.category,
            Dimension::Subcategory => &mut self.subcategory,
            Dimension::Region => &mut self.region,
            Dimension::Priority => &mut self.priority,
            Dimension::ShipMode => &mut self.ship_mode,
            Dimension::StateProvince => &mut self.state_province,
        }
    }
}

/// Choices for one filter widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionOptions {
    pub dimension: Dimension,
    pub label: String,
    /// [`ALL`] followed by the distinct values found in the data store
    pub values: Vec<String>,
}

/// Response for the filter sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptions {
    pub dimensions: Vec<DimensionOptions>,
}

/// Sales summed per calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySalesRow {
    /// First day of the month
    pub month: NaiveDate,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySalesRow {
    pub category: String,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSalesRow {
    pub segment: String,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSalesRow {
    /// Two-letter state code, e.g. "CA"
    pub state_code: String,
    pub total_sales: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalsSummary {
    pub total_sales: f64,
    pub total_profit: f64,
}

/// Key metrics block: raw totals plus display strings ("$1.2M")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub totals: TotalsSummary,
    pub total_sales_display: String,
    pub total_profit_display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewErrorKind {
    InvalidFilter,
    QueryExecution,
    DataConversion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewError {
    pub kind: ViewErrorKind,
    pub message: String,
}

/// Result of a single dashboard view.
///
/// A failed view does not affect the other views of the same response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView<T> {
    Ready { data: T },
    Failed { error: ViewError },
}

impl<T> DashboardView<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            DashboardView::Ready { data } => Some(data),
            DashboardView::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            DashboardView::Ready { .. } => None,
            DashboardView::Failed { error } => Some(error),
        }
    }
}

/// Response for the sales overview dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesDashboardResponse {
    /// Filters that were applied, with unset dimensions as `None`
    pub filters: FilterSelection,
    pub key_metrics: DashboardView<KeyMetrics>,
    pub sales_by_state: DashboardView<Vec<StateSalesRow>>,
    pub top_categories: DashboardView<Vec<CategorySalesRow>>,
    pub monthly_sales: DashboardView<Vec<MonthlySalesRow>>,
    pub top_segments: DashboardView<Vec<SegmentSalesRow>>,
}

/// Body of a rejected request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
