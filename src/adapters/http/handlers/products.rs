use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::{
  adapters::http::{dtos::ProduitResponse, errors::ApiError},
  application::invoicing::ListProductsUseCase,
};

/// List the product catalog
/// GET /api/produits
pub async fn list_products_handler(
  use_case: web::Data<Arc<ListProductsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  let products: Vec<ProduitResponse> = response
    .products
    .into_iter()
    .map(|p| ProduitResponse {
      id: p.id,
      designation: p.designation,
      prix_unitaire_ht: p.unit_price_ht,
    })
    .collect();

  Ok(HttpResponse::Ok().json(products))
}
