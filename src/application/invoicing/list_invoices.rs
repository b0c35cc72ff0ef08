use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoicing::{InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct InvoiceListItemDto {
  pub id: Uuid,
  pub reference: String,
  pub invoice_date: NaiveDate,
  pub client_name: String,
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<ListInvoicesResponse, InvoiceError> {
    let invoices = self.invoice_service.list_invoices().await?;

    let invoice_dtos = invoices
      .into_iter()
      .map(|item| InvoiceListItemDto {
        id: item.invoice.id,
        reference: item.invoice.reference.into_inner(),
        invoice_date: item.invoice.invoice_date,
        client_name: item.client_name,
        total_ht: item.invoice.total_ht,
        total_ttc: item.invoice.total_ttc,
      })
      .collect();

    Ok(ListInvoicesResponse {
      invoices: invoice_dtos,
    })
  }
}
