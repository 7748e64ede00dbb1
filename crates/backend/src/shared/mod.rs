pub mod config;
pub mod currency;
pub mod data;
pub mod format;
