use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoicing::{InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct ProductListItemDto {
  pub id: Uuid,
  pub designation: String,
  pub unit_price_ht: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
  pub products: Vec<ProductListItemDto>,
}

pub struct ListProductsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListProductsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<ListProductsResponse, InvoiceError> {
    let products = self.invoice_service.list_products().await?;

    let product_dtos = products
      .into_iter()
      .map(|product| ProductListItemDto {
        id: product.id,
        designation: product.designation.into_inner(),
        unit_price_ht: product.unit_price_ht.value(),
      })
      .collect();

    Ok(ListProductsResponse {
      products: product_dtos,
    })
  }
}
