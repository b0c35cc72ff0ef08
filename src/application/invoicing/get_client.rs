use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::invoicing::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct GetClientCommand {
  pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ClientDetailsResponse {
  pub code: String,
  pub name: String,
  pub street: Option<String>,
  pub postal_code: Option<String>,
  pub city: Option<String>,
}

pub struct GetClientUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetClientUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetClientCommand,
  ) -> Result<ClientDetailsResponse, InvoiceError> {
    let client = self.invoice_service.get_client(&command.code).await?;

    Ok(ClientDetailsResponse {
      code: client.code.into_inner(),
      name: client.name.into_inner(),
      street: client.street,
      postal_code: client.postal_code,
      city: client.city,
    })
  }
}
