//! Invoicing backend: clients, a product catalog, time-ranged VAT rate
//! history and invoice generation with a per-rate tax breakdown.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
