use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::{
  adapters::http::{
    dtos::{ClientResponse, ClientSummaryResponse},
    errors::ApiError,
  },
  application::invoicing::{GetClientCommand, GetClientUseCase, ListClientsUseCase},
};

/// List all clients
/// GET /api/clients
pub async fn list_clients_handler(
  use_case: web::Data<Arc<ListClientsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  let clients: Vec<ClientSummaryResponse> = response
    .clients
    .into_iter()
    .map(|c| ClientSummaryResponse {
      id: c.id,
      code: c.code,
      nom: c.name,
    })
    .collect();

  Ok(HttpResponse::Ok().json(clients))
}

/// Get one client by code
/// GET /api/clients/{code}
pub async fn get_client_handler(
  path: web::Path<String>,
  use_case: web::Data<Arc<GetClientUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetClientCommand {
    code: path.into_inner(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ClientResponse {
    code: response.code,
    nom: response.name,
    adresse: response.street,
    code_postal: response.postal_code,
    ville: response.city,
  }))
}
