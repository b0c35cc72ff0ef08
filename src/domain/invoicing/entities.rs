use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::value_objects::{
  ClientCode, ClientName, Designation, InvoiceReference, PaymentTerms, Quantity, UnitPrice,
  VatRate,
};

// Client - invoice recipient, looked up by external code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
  pub id: Uuid,
  pub code: ClientCode,
  pub name: ClientName,
  pub street: Option<String>,
  pub postal_code: Option<String>,
  pub city: Option<String>,
}

impl Client {
  pub fn new(
    code: ClientCode,
    name: ClientName,
    street: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      code,
      name,
      street,
      postal_code,
      city,
    }
  }
}

// Product - catalog entry, looked up by designation on generation requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub designation: Designation,
  pub unit_price_ht: UnitPrice,
  pub tax_category_id: Uuid,
}

impl Product {
  pub fn new(designation: Designation, unit_price_ht: UnitPrice, tax_category_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      designation,
      unit_price_ht,
      tax_category_id,
    }
  }
}

// Tax Rate - one interval of a category's rate history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
  pub id: Uuid,
  pub category_id: Uuid,
  pub rate: VatRate,
  pub valid_from: NaiveDate,
  pub valid_until: Option<NaiveDate>,
}

impl TaxRate {
  pub fn new(
    category_id: Uuid,
    rate: VatRate,
    valid_from: NaiveDate,
    valid_until: Option<NaiveDate>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      category_id,
      rate,
      valid_from,
      valid_until,
    }
  }

  /// True when the interval covers the given date. Both bounds are inclusive;
  /// a missing end date means the rate is still open-ended.
  pub fn is_effective_on(&self, on_date: NaiveDate) -> bool {
    self.valid_from <= on_date && self.valid_until.map_or(true, |end| end >= on_date)
  }
}

// Invoice - generated document header with computed totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub reference: InvoiceReference,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub client_id: Uuid,
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
  pub payment_terms: PaymentTerms,
}

impl Invoice {
  pub fn new(
    reference: InvoiceReference,
    invoice_date: NaiveDate,
    due_date: NaiveDate,
    client_id: Uuid,
    payment_terms: PaymentTerms,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      reference,
      invoice_date,
      due_date,
      client_id,
      total_ht: Decimal::ZERO,
      total_ttc: Decimal::ZERO,
      payment_terms,
    }
  }

  pub fn apply_totals(&mut self, totals: &InvoiceTotals) {
    self.total_ht = totals.total_ht;
    self.total_ttc = totals.total_ttc;
  }
}

// Invoice Line - denormalized snapshot of the product and rate at generation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub product_id: Uuid,
  pub designation: Designation,
  pub unit_price_ht: UnitPrice,
  pub quantity: Quantity,
  pub vat_rate: VatRate,
  pub line_order: i32,
}

impl InvoiceLine {
  pub fn new(
    invoice_id: Uuid,
    product_id: Uuid,
    designation: Designation,
    unit_price_ht: UnitPrice,
    quantity: Quantity,
    vat_rate: VatRate,
    line_order: i32,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_id,
      product_id,
      designation,
      unit_price_ht,
      quantity,
      vat_rate,
      line_order,
    }
  }

  pub fn total_ht(&self) -> Decimal {
    self.unit_price_ht.value() * self.quantity.as_decimal()
  }

  pub fn tax_amount(&self) -> Decimal {
    self.total_ht() * self.vat_rate.as_multiplier()
  }

  pub fn total_ttc(&self) -> Decimal {
    self.total_ht() + self.tax_amount()
  }
}

// Invoice Tax Total - persisted per-rate breakdown row owned by one invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTaxTotal {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub rate: VatRate,
  pub amount: Decimal,
}

impl InvoiceTaxTotal {
  pub fn new(invoice_id: Uuid, rate: VatRate, amount: Decimal) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_id,
      rate,
      amount,
    }
  }
}

// Invoice Totals - accumulated over lines, grouped by distinct rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTotals {
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
  pub tax_by_rate: BTreeMap<VatRate, Decimal>,
}

impl InvoiceTotals {
  pub fn calculate(lines: &[InvoiceLine]) -> Self {
    let mut total_ht = Decimal::ZERO;
    let mut total_ttc = Decimal::ZERO;
    let mut tax_by_rate: BTreeMap<VatRate, Decimal> = BTreeMap::new();

    for line in lines {
      *tax_by_rate.entry(line.vat_rate).or_insert(Decimal::ZERO) += line.tax_amount();
      total_ht += line.total_ht();
      total_ttc += line.total_ttc();
    }

    Self {
      total_ht,
      total_ttc,
      tax_by_rate,
    }
  }

  /// One persisted breakdown row per distinct rate, ordered by ascending rate.
  pub fn breakdown_rows(&self, invoice_id: Uuid) -> Vec<InvoiceTaxTotal> {
    self
      .tax_by_rate
      .iter()
      .map(|(rate, amount)| InvoiceTaxTotal::new(invoice_id, *rate, *amount))
      .collect()
  }
}

// Invoice With Client - read model for the invoice listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceWithClient {
  pub invoice: Invoice,
  pub client_name: String,
}
