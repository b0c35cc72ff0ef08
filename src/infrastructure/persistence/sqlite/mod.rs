use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::invoicing::errors::InvoiceError;

pub mod client_repository;
pub mod invoice_repository;
pub mod product_repository;
pub mod tax_rate_repository;

pub use client_repository::SqliteClientRepository;
pub use invoice_repository::SqliteInvoiceRepository;
pub use product_repository::SqliteProductRepository;
pub use tax_rate_repository::SqliteTaxRateRepository;

/// Decimals are stored as TEXT in SQLite; convert at the row boundary.
pub(crate) fn parse_decimal(value: &str, column: &str) -> Result<Decimal, InvoiceError> {
  Decimal::from_str(value).map_err(|_| {
    InvoiceError::Internal(format!("Invalid decimal '{}' in column {}", value, column))
  })
}
