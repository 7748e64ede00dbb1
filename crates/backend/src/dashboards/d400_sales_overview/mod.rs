//! D400 Superstore sales overview.
//!
//! Filter selections become a [`filter::Predicate`] that every aggregate in
//! [`repository`] applies to the same fixed join of the sales star schema.

pub mod error;
pub mod filter;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::DashboardError;
pub use filter::{FilterDomain, FilterModel, Predicate};
