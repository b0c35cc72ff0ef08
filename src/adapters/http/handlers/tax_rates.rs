use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::{
  adapters::http::{
    dtos::{EnVigueurQuery, TauxTvaResponse},
    errors::ApiError,
  },
  application::invoicing::{ListEffectiveRatesCommand, ListEffectiveRatesUseCase},
};

/// List VAT rates effective on a date (today when no date is given)
/// GET /api/tva/en-vigueur
pub async fn list_effective_rates_handler(
  query: web::Query<EnVigueurQuery>,
  use_case: web::Data<Arc<ListEffectiveRatesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ListEffectiveRatesCommand {
    on_date: query.into_inner().date,
  };

  let response = use_case.execute(command).await?;

  let rates: Vec<TauxTvaResponse> = response
    .rates
    .into_iter()
    .map(|r| TauxTvaResponse {
      taux: r.rate,
      date_debut: r.valid_from,
      date_fin: r.valid_until,
    })
    .collect();

  Ok(HttpResponse::Ok().json(rates))
}
