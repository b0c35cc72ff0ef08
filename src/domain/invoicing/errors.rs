use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Client not found: {0}")]
  ClientNotFound(String),

  #[error("Product not found: {0}")]
  ProductNotFound(String),

  #[error("No tax rate effective on {on_date} for category {category_id}")]
  RateNotFound {
    category_id: Uuid,
    on_date: NaiveDate,
  },

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(String),

  #[error("Invoice reference '{0}' already exists")]
  ReferenceAlreadyExists(String),

  #[error("No invoice lines provided")]
  NoLines,

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
