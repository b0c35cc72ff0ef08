use actix_web::{HttpResponse, web};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{
      FactureDetailsResponse, FactureSummaryResponse, GenererFactureRequest,
      GenererFactureResponse, LigneFactureResponse, TotalTvaResponse,
    },
    errors::ApiError,
  },
  application::invoicing::{
    GenerateInvoiceCommand, GenerateInvoiceLineDto, GenerateInvoiceUseCase,
    GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
  },
};

/// List all invoices
/// GET /api/factures
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  let invoices: Vec<FactureSummaryResponse> = response
    .invoices
    .into_iter()
    .map(|i| FactureSummaryResponse {
      id: i.id,
      reference: i.reference,
      date_facturation: i.invoice_date,
      nom_du_client: i.client_name,
      total_ht: i.total_ht,
      total_ttc: i.total_ttc,
    })
    .collect();

  Ok(HttpResponse::Ok().json(invoices))
}

/// Generate a new invoice
/// POST /api/factures/generer
pub async fn generate_invoice_handler(
  request: web::Json<GenererFactureRequest>,
  use_case: web::Data<Arc<GenerateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = GenerateInvoiceCommand {
    client_code: request.code_client,
    invoice_date: request.date_facturation,
    due_date: request.date_echeance,
    payment_terms: request.conditions_reglement,
    lines: request
      .lignes
      .into_iter()
      .map(|ligne| GenerateInvoiceLineDto {
        designation: ligne.designation_id,
        quantity: ligne.quantite,
      })
      .collect(),
  };

  let response = use_case.execute(command).await?;

  let totaux_tva: BTreeMap<String, Decimal> = response
    .tax_totals
    .into_iter()
    .map(|total| (total.rate.to_string(), total.amount))
    .collect();

  Ok(HttpResponse::Created().json(GenererFactureResponse {
    reference: response.reference,
    total_ht: response.total_ht,
    total_ttc: response.total_ttc,
    totaux_tva,
  }))
}

/// Get one invoice with its lines and tax breakdown
/// GET /api/factures/{reference}
pub async fn get_invoice_details_handler(
  path: web::Path<String>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetInvoiceDetailsCommand {
    reference: path.into_inner(),
  };

  let response = use_case.execute(command).await?;

  let lignes: Vec<LigneFactureResponse> = response
    .lines
    .into_iter()
    .map(|l| LigneFactureResponse {
      designation: l.designation,
      prix_unitaire_ht: l.unit_price_ht,
      quantite: l.quantity,
      taux_tva: l.vat_rate,
    })
    .collect();

  let totaux_tva: Vec<TotalTvaResponse> = response
    .tax_totals
    .into_iter()
    .map(|t| TotalTvaResponse {
      taux: t.rate,
      montant: t.amount,
    })
    .collect();

  Ok(HttpResponse::Ok().json(FactureDetailsResponse {
    reference: response.reference,
    date_facturation: response.invoice_date,
    date_echeance: response.due_date,
    client: response.client_name,
    total_ht: response.total_ht,
    total_ttc: response.total_ttc,
    lignes,
    totaux_tva,
  }))
}
