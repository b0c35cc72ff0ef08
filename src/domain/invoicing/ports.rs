use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::entities::{
  Client, Invoice, InvoiceLine, InvoiceTaxTotal, InvoiceWithClient, Product, TaxRate,
};
use super::errors::InvoiceError;

#[async_trait]
pub trait ClientRepository: Send + Sync {
  async fn insert(&self, client: Client) -> Result<Client, InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, InvoiceError>;
  async fn find_by_code(&self, code: &str) -> Result<Option<Client>, InvoiceError>;
  async fn list(&self) -> Result<Vec<Client>, InvoiceError>;
  async fn count(&self) -> Result<i64, InvoiceError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn insert(&self, product: Product) -> Result<Product, InvoiceError>;
  async fn find_by_designation(&self, designation: &str) -> Result<Option<Product>, InvoiceError>;
  async fn list(&self) -> Result<Vec<Product>, InvoiceError>;
}

#[async_trait]
pub trait TaxRateRepository: Send + Sync {
  async fn insert(&self, rate: TaxRate) -> Result<TaxRate, InvoiceError>;
  /// Rate of the given category covering `on_date`. When overlapping intervals
  /// exist, the most recently started interval wins.
  async fn find_effective_for_category(
    &self,
    category_id: Uuid,
    on_date: NaiveDate,
  ) -> Result<Option<TaxRate>, InvoiceError>;
  /// All rates covering `on_date`, across every category.
  async fn list_effective_on(&self, on_date: NaiveDate) -> Result<Vec<TaxRate>, InvoiceError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Draws the next value from the store-owned reference sequence. The
  /// increment is atomic; two concurrent generations never see the same value.
  async fn next_sequence_number(&self) -> Result<i64, InvoiceError>;
  /// Persists the invoice together with its lines and tax breakdown in one
  /// transaction. Nothing is stored when any insert fails.
  async fn create(
    &self,
    invoice: Invoice,
    lines: Vec<InvoiceLine>,
    tax_totals: Vec<InvoiceTaxTotal>,
  ) -> Result<Invoice, InvoiceError>;
  async fn find_by_reference(&self, reference: &str) -> Result<Option<Invoice>, InvoiceError>;
  async fn find_lines(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLine>, InvoiceError>;
  async fn find_tax_totals(&self, invoice_id: Uuid)
  -> Result<Vec<InvoiceTaxTotal>, InvoiceError>;
  async fn list_with_client(&self) -> Result<Vec<InvoiceWithClient>, InvoiceError>;
}
