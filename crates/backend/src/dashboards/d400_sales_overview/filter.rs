use std::collections::BTreeMap;

use contracts::dashboards::d400_sales_overview::{
    Dimension, DimensionOptions, FilterOptions, FilterSelection, ALL,
};
use sea_orm::{DatabaseBackend, Value};

use super::error::DashboardError;

/// Table alias and column a dimension is filtered on inside the sales join
pub fn column_ref(dimension: Dimension) -> (&'static str, &'static str) {
    match dimension {
        Dimension::Segment => ("c", "segment"),
        Dimension::Category => ("p", "category"),
        Dimension::Subcategory => ("p", "subcategory"),
        Dimension::Region => ("a", "region"),
        Dimension::Priority => ("o", "priority"),
        Dimension::ShipMode => ("sh", "shipmode"),
        Dimension::StateProvince => ("a", "state_province"),
    }
}

/// Table holding the distinct values of a dimension
pub fn source_table(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Segment => "customer",
        Dimension::Category | Dimension::Subcategory => "product",
        Dimension::Region | Dimension::StateProvince => "address",
        Dimension::Priority => "\"Order\"",
        Dimension::ShipMode => "shipping",
    }
}

fn is_unset(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == ALL
}

// ---------------------------------------------------------------------------
// Filter domain
// ---------------------------------------------------------------------------

/// Distinct values the data store reports for each dimension
#[derive(Debug, Clone, Default)]
pub struct FilterDomain {
    values: BTreeMap<Dimension, Vec<String>>,
}

impl FilterDomain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(dimension, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn insert(&mut self, dimension: Dimension, values: Vec<String>) {
        self.values.insert(dimension, values);
    }

    pub fn values(&self, dimension: Dimension) -> &[String] {
        self.values
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.values(dimension).iter().any(|v| v == value)
    }

    /// Widget choices: `ALL` first, then the known values
    pub fn to_options(&self) -> FilterOptions {
        let dimensions = Dimension::all()
            .into_iter()
            .map(|dimension| {
                let mut values = Vec::with_capacity(self.values(dimension).len() + 1);
                values.push(ALL.to_string());
                values.extend(self.values(dimension).iter().cloned());
                DimensionOptions {
                    dimension,
                    label: dimension.label().to_string(),
                    values,
                }
            })
            .collect();
        FilterOptions { dimensions }
    }
}

// ---------------------------------------------------------------------------
// Filter model
// ---------------------------------------------------------------------------

/// Current filter state, validated against a [`FilterDomain`]
#[derive(Debug, Clone)]
pub struct FilterModel {
    domain: FilterDomain,
    selected: BTreeMap<Dimension, String>,
}

impl FilterModel {
    pub fn new(domain: FilterDomain) -> Self {
        Self {
            domain,
            selected: BTreeMap::new(),
        }
    }

    /// Applies every entry of a client selection, stopping at the first invalid value
    pub fn from_selection(
        domain: FilterDomain,
        selection: &FilterSelection,
    ) -> Result<Self, DashboardError> {
        let mut model = Self::new(domain);
        for (dimension, value) in selection.entries() {
            if let Some(value) = value {
                model.set(dimension, value)?;
            }
        }
        Ok(model)
    }

    /// Records a selection. `ALL` or a blank value clears the dimension.
    pub fn set(&mut self, dimension: Dimension, value: &str) -> Result<(), DashboardError> {
        if is_unset(value) {
            self.clear(dimension);
            return Ok(());
        }
        if !self.domain.contains(dimension, value) {
            return Err(DashboardError::InvalidFilterValue {
                dimension,
                value: value.to_string(),
            });
        }
        self.selected.insert(dimension, value.to_string());
        Ok(())
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.selected.remove(&dimension);
    }

    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.selected.get(&dimension).map(String::as_str)
    }

    pub fn domain(&self) -> &FilterDomain {
        &self.domain
    }

    /// Normalized selection: unset dimensions are `None`
    pub fn selection(&self) -> FilterSelection {
        self.selected
            .iter()
            .fold(FilterSelection::default(), |acc, (dimension, value)| {
                acc.with(*dimension, value.clone())
            })
    }

    pub fn to_predicate(&self) -> Predicate {
        self.selected
            .iter()
            .fold(Predicate::match_all(), |predicate, (dimension, value)| {
                predicate.and(*dimension, value.clone())
            })
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Equality constraint on one dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub dimension: Dimension,
    pub value: String,
}

impl Constraint {
    /// Qualified column, e.g. `c.segment`
    pub fn column(&self) -> String {
        let (alias, column) = column_ref(self.dimension);
        format!("{}.{}", alias, column)
    }
}

/// Conjunction of equality constraints, kept in canonical dimension order.
/// An empty predicate matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    constraints: Vec<Constraint>,
}

/// SQL fragment with its bound values, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPredicate {
    pub sql: String,
    pub values: Vec<Value>,
}

impl Predicate {
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the constraint for `dimension`
    pub fn and(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        let constraint = Constraint {
            dimension,
            value: value.into(),
        };
        match self
            .constraints
            .binary_search_by(|c| c.dimension.cmp(&dimension))
        {
            Ok(pos) => self.constraints[pos] = constraint,
            Err(pos) => self.constraints.insert(pos, constraint),
        }
        self
    }

    pub fn is_match_all(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Values in placeholder order
    pub fn bound_values(&self) -> Vec<&str> {
        self.constraints.iter().map(|c| c.value.as_str()).collect()
    }

    /// Renders the WHERE body with placeholders of the given backend
    pub fn render(&self, backend: DatabaseBackend) -> RenderedPredicate {
        if self.constraints.is_empty() {
            return RenderedPredicate {
                sql: "1=1".to_string(),
                values: Vec::new(),
            };
        }

        let mut conditions = Vec::with_capacity(self.constraints.len());
        let mut values = Vec::with_capacity(self.constraints.len());
        for (i, constraint) in self.constraints.iter().enumerate() {
            conditions.push(format!(
                "{} = {}",
                constraint.column(),
                placeholder(backend, i + 1)
            ));
            values.push(Value::from(constraint.value.clone()));
        }

        RenderedPredicate {
            sql: conditions.join(" AND "),
            values,
        }
    }
}

/// Positional placeholder: `$n` for PostgreSQL, `?` elsewhere
fn placeholder(backend: DatabaseBackend, index: usize) -> String {
    match backend {
        DatabaseBackend::Postgres => format!("${}", index),
        DatabaseBackend::MySql | DatabaseBackend::Sqlite => "?".to_string(),
    }
}
