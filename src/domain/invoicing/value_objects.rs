use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid client code: {0}")]
  InvalidClientCode(String),
  #[error("Invalid client name: {0}")]
  InvalidClientName(String),
  #[error("Invalid designation: {0}")]
  InvalidDesignation(String),
  #[error("Invalid unit price: {0}")]
  InvalidUnitPrice(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid VAT rate: {0}")]
  InvalidVatRate(String),
  #[error("Invalid payment terms: {0}")]
  InvalidPaymentTerms(String),
  #[error("Invalid invoice reference: {0}")]
  InvalidInvoiceReference(String),
}

// Client Code - external identifier used by callers (e.g. "CU2203-0005")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCode(String);

impl ClientCode {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidClientCode(
        "Client code cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 20 {
      return Err(ValueObjectError::InvalidClientCode(
        "Client code cannot exceed 20 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for ClientCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Client Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientName(String);

impl ClientName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Designation - product label, also the lookup key on invoice lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designation(String);

impl Designation {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidDesignation(
        "Designation cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidDesignation(
        "Designation cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Designation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Unit Price - per-unit amount excluding tax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price cannot be negative".to_string(),
      ));
    }
    // Max 2 decimal places
    if value.scale() > 2 {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price cannot have more than 2 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Quantity - whole units, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(i64);

impl Quantity {
  pub fn new(value: i64) -> Result<Self, ValueObjectError> {
    if value < 1 {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity must be a positive integer".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> i64 {
    self.0
  }

  pub fn as_decimal(&self) -> Decimal {
    Decimal::from(self.0)
  }
}

// VAT Rate - percentage applied to pre-tax amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VatRate(Decimal);

impl VatRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
      return Err(ValueObjectError::InvalidVatRate(
        "VAT rate must be between 0 and 100".to_string(),
      ));
    }
    // Max 2 decimal places
    if value.scale() > 2 {
      return Err(ValueObjectError::InvalidVatRate(
        "VAT rate cannot have more than 2 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_multiplier(&self) -> Decimal {
    self.0 / Decimal::from(100)
  }
}

impl fmt::Display for VatRate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Payment Terms - free text carried onto the invoice (e.g. "Règlement à la livraison")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms(String);

impl PaymentTerms {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.len() > 200 {
      return Err(ValueObjectError::InvalidPaymentTerms(
        "Payment terms cannot exceed 200 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Invoice Reference - human-facing identifier, "<year>-<zero-padded counter>"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceReference(String);

impl InvoiceReference {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceReference(
        "Invoice reference cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 20 {
      return Err(ValueObjectError::InvalidInvoiceReference(
        "Invoice reference cannot exceed 20 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  /// Builds a reference from a calendar year and a sequence number.
  ///
  /// The counter is rendered on four digits and widens naturally past 9999.
  pub fn from_parts(year: i32, sequence: i64) -> Self {
    Self(format!("{}-{:04}", year, sequence))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
