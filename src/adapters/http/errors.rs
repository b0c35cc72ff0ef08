use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::invoicing::errors::InvoiceError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Missing resource (404 Not Found)
  NotFound(NotFoundKind),

  /// Duplicate invoice reference (409 Conflict)
  Conflict(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// The kinds of resource a lookup can miss
#[derive(Debug, Serialize)]
pub enum NotFoundKind {
  /// Unknown client code
  Client(String),

  /// Unknown product designation
  Product(String),

  /// No VAT rate applicable on the invoice date
  Rate(String),

  /// Unknown invoice reference
  Invoice(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(kind) => write!(f, "Not found: {:?}", kind),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(kind) => match kind {
        NotFoundKind::Client(code) => ("client_not_found", format!("No client with code {}", code)),
        NotFoundKind::Product(designation) => (
          "product_not_found",
          format!("No product with designation {}", designation),
        ),
        NotFoundKind::Rate(msg) => ("rate_not_found", msg.clone()),
        NotFoundKind::Invoice(reference) => (
          "invoice_not_found",
          format!("No invoice with reference {}", reference),
        ),
      },
      ApiError::Conflict(msg) => ("reference_conflict", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert InvoiceError to ApiError
impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(err) => ApiError::Validation(err.to_string()),
      InvoiceError::NoLines => {
        ApiError::Validation("An invoice needs at least one line".to_string())
      }
      InvoiceError::ClientNotFound(code) => ApiError::NotFound(NotFoundKind::Client(code)),
      InvoiceError::ProductNotFound(designation) => {
        ApiError::NotFound(NotFoundKind::Product(designation))
      }
      InvoiceError::RateNotFound {
        category_id,
        on_date,
      } => ApiError::NotFound(NotFoundKind::Rate(format!(
        "No VAT rate effective on {} for category {}",
        on_date, category_id
      ))),
      InvoiceError::InvoiceNotFound(reference) => {
        ApiError::NotFound(NotFoundKind::Invoice(reference))
      }
      InvoiceError::ReferenceAlreadyExists(reference) => {
        ApiError::Conflict(format!("Invoice reference {} already exists", reference))
      }
      InvoiceError::Database(err) => ApiError::Internal(err.to_string()),
      InvoiceError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}
