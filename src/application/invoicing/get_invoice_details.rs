use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::invoicing::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceDetailsCommand {
  pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceLineDto {
  pub designation: String,
  pub unit_price_ht: Decimal,
  pub quantity: i64,
  pub vat_rate: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TaxTotalDto {
  pub rate: Decimal,
  pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  pub reference: String,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub client_name: String,
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
  pub lines: Vec<InvoiceLineDto>,
  pub tax_totals: Vec<TaxTotalDto>,
}

pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceDetailsCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let (invoice, client, lines, tax_totals) = self
      .invoice_service
      .get_invoice_details(&command.reference)
      .await?;

    let line_dtos = lines
      .iter()
      .map(|line| InvoiceLineDto {
        designation: line.designation.value().to_string(),
        unit_price_ht: line.unit_price_ht.value(),
        quantity: line.quantity.value(),
        vat_rate: line.vat_rate.value(),
      })
      .collect();

    let tax_total_dtos = tax_totals
      .iter()
      .map(|total| TaxTotalDto {
        rate: total.rate.value(),
        amount: total.amount,
      })
      .collect();

    Ok(InvoiceDetailsResponse {
      reference: invoice.reference.into_inner(),
      invoice_date: invoice.invoice_date,
      due_date: invoice.due_date,
      client_name: client.name.into_inner(),
      total_ht: invoice.total_ht,
      total_ttc: invoice.total_ttc,
      lines: line_dtos,
      tax_totals: tax_total_dtos,
    })
  }
}
