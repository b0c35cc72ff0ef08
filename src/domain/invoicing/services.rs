use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{
  Client, Invoice, InvoiceLine, InvoiceTaxTotal, InvoiceTotals, InvoiceWithClient, Product,
  TaxRate,
};
use super::errors::InvoiceError;
use super::ports::{ClientRepository, InvoiceRepository, ProductRepository, TaxRateRepository};
use super::value_objects::{ClientCode, Designation, InvoiceReference, PaymentTerms, Quantity};

/// Resolves which VAT rate applies to a tax category on a given date.
///
/// Rates form a time-ranged history per category; the interval covering the
/// reference date wins. Absence of a covering interval is an error and must
/// abort whatever computation asked for the rate.
pub struct TaxRateResolver {
  rate_repo: Arc<dyn TaxRateRepository>,
}

impl TaxRateResolver {
  pub fn new(rate_repo: Arc<dyn TaxRateRepository>) -> Self {
    Self { rate_repo }
  }

  pub async fn resolve(
    &self,
    category_id: Uuid,
    on_date: NaiveDate,
  ) -> Result<TaxRate, InvoiceError> {
    self
      .rate_repo
      .find_effective_for_category(category_id, on_date)
      .await?
      .ok_or(InvoiceError::RateNotFound {
        category_id,
        on_date,
      })
  }

  pub async fn effective_on(&self, on_date: NaiveDate) -> Result<Vec<TaxRate>, InvoiceError> {
    self.rate_repo.list_effective_on(on_date).await
  }
}

/// Invoice generation data
pub struct GenerateInvoiceData {
  pub client_code: ClientCode,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub payment_terms: PaymentTerms,
  pub lines: Vec<(Designation, Quantity)>,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  client_repo: Arc<dyn ClientRepository>,
  product_repo: Arc<dyn ProductRepository>,
  rate_resolver: Arc<TaxRateResolver>,
}

impl InvoiceService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    client_repo: Arc<dyn ClientRepository>,
    product_repo: Arc<dyn ProductRepository>,
    rate_resolver: Arc<TaxRateResolver>,
  ) -> Self {
    Self {
      invoice_repo,
      client_repo,
      product_repo,
      rate_resolver,
    }
  }

  // Catalog lookups
  pub async fn list_clients(&self) -> Result<Vec<Client>, InvoiceError> {
    self.client_repo.list().await
  }

  pub async fn get_client(&self, code: &str) -> Result<Client, InvoiceError> {
    self
      .client_repo
      .find_by_code(code)
      .await?
      .ok_or_else(|| InvoiceError::ClientNotFound(code.to_string()))
  }

  pub async fn list_products(&self) -> Result<Vec<Product>, InvoiceError> {
    self.product_repo.list().await
  }

  // Invoice operations
  pub async fn generate_invoice(
    &self,
    data: GenerateInvoiceData,
  ) -> Result<(Invoice, InvoiceTotals), InvoiceError> {
    let client = self
      .client_repo
      .find_by_code(data.client_code.value())
      .await?
      .ok_or_else(|| InvoiceError::ClientNotFound(data.client_code.value().to_string()))?;

    if data.lines.is_empty() {
      return Err(InvoiceError::NoLines);
    }

    // Reference assignment: store-owned sequence, year taken from the clock
    let sequence = self.invoice_repo.next_sequence_number().await?;
    let reference = InvoiceReference::from_parts(Utc::now().year(), sequence);

    let mut invoice = Invoice::new(
      reference,
      data.invoice_date,
      data.due_date,
      client.id,
      data.payment_terms,
    );

    let mut lines = Vec::with_capacity(data.lines.len());
    for (i, (designation, quantity)) in data.lines.into_iter().enumerate() {
      let product = self
        .product_repo
        .find_by_designation(designation.value())
        .await?
        .ok_or_else(|| InvoiceError::ProductNotFound(designation.value().to_string()))?;

      let rate = self
        .rate_resolver
        .resolve(product.tax_category_id, data.invoice_date)
        .await?;

      // Snapshot the product and rate so later catalog changes leave
      // historical invoices untouched
      lines.push(InvoiceLine::new(
        invoice.id,
        product.id,
        product.designation,
        product.unit_price_ht,
        quantity,
        rate.rate,
        (i + 1) as i32,
      ));
    }

    let totals = InvoiceTotals::calculate(&lines);
    invoice.apply_totals(&totals);
    let tax_totals = totals.breakdown_rows(invoice.id);

    let created = self.invoice_repo.create(invoice, lines, tax_totals).await?;

    Ok((created, totals))
  }

  pub async fn list_invoices(&self) -> Result<Vec<InvoiceWithClient>, InvoiceError> {
    self.invoice_repo.list_with_client().await
  }

  pub async fn get_invoice_details(
    &self,
    reference: &str,
  ) -> Result<(Invoice, Client, Vec<InvoiceLine>, Vec<InvoiceTaxTotal>), InvoiceError> {
    let invoice = self
      .invoice_repo
      .find_by_reference(reference)
      .await?
      .ok_or_else(|| InvoiceError::InvoiceNotFound(reference.to_string()))?;

    let client = self
      .client_repo
      .find_by_id(invoice.client_id)
      .await?
      .ok_or_else(|| {
        InvoiceError::Internal(format!("Client {} missing for invoice", invoice.client_id))
      })?;

    let lines = self.invoice_repo.find_lines(invoice.id).await?;
    let tax_totals = self.invoice_repo.find_tax_totals(invoice.id).await?;

    Ok((invoice, client, lines, tax_totals))
  }
}
