use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoicing::{InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct ClientListItemDto {
  pub id: Uuid,
  pub code: String,
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ListClientsResponse {
  pub clients: Vec<ClientListItemDto>,
}

pub struct ListClientsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListClientsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<ListClientsResponse, InvoiceError> {
    let clients = self.invoice_service.list_clients().await?;

    let client_dtos = clients
      .into_iter()
      .map(|client| ClientListItemDto {
        id: client.id,
        code: client.code.into_inner(),
        name: client.name.into_inner(),
      })
      .collect();

    Ok(ListClientsResponse {
      clients: client_dtos,
    })
  }
}
