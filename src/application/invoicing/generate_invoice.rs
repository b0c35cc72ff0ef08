use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::invoicing::{
  ClientCode, Designation, GenerateInvoiceData, InvoiceError, InvoiceService, PaymentTerms,
  Quantity,
};

#[derive(Debug, Deserialize)]
pub struct GenerateInvoiceLineDto {
  pub designation: String,
  pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateInvoiceCommand {
  pub client_code: String,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub payment_terms: String,
  pub lines: Vec<GenerateInvoiceLineDto>,
}

#[derive(Debug, Serialize)]
pub struct TaxTotalSummaryDto {
  pub rate: Decimal,
  pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct GenerateInvoiceResponse {
  pub reference: String,
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
  pub tax_totals: Vec<TaxTotalSummaryDto>,
}

pub struct GenerateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GenerateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GenerateInvoiceCommand,
  ) -> Result<GenerateInvoiceResponse, InvoiceError> {
    let client_code = ClientCode::new(command.client_code)?;
    let payment_terms = PaymentTerms::new(command.payment_terms)?;

    let lines: Vec<_> = command
      .lines
      .into_iter()
      .map(|line| {
        let designation = Designation::new(line.designation)?;
        let quantity = Quantity::new(line.quantity)?;
        Ok((designation, quantity))
      })
      .collect::<Result<Vec<_>, InvoiceError>>()?;

    let invoice_data = GenerateInvoiceData {
      client_code,
      invoice_date: command.invoice_date,
      due_date: command.due_date,
      payment_terms,
      lines,
    };

    let (invoice, totals) = self.invoice_service.generate_invoice(invoice_data).await?;

    let tax_totals = totals
      .tax_by_rate
      .iter()
      .map(|(rate, amount)| TaxTotalSummaryDto {
        rate: rate.value(),
        amount: *amount,
      })
      .collect();

    Ok(GenerateInvoiceResponse {
      reference: invoice.reference.into_inner(),
      total_ht: invoice.total_ht,
      total_ttc: invoice.total_ttc,
      tax_totals,
    })
  }
}
