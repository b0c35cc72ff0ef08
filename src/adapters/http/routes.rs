use actix_web::web;
use std::sync::Arc;

use crate::application::invoicing::{
  GenerateInvoiceUseCase, GetClientUseCase, GetInvoiceDetailsUseCase, ListClientsUseCase,
  ListEffectiveRatesUseCase, ListInvoicesUseCase, ListProductsUseCase,
};

use super::handlers::clients::{get_client_handler, list_clients_handler};
use super::handlers::invoices::{
  generate_invoice_handler, get_invoice_details_handler, list_invoices_handler,
};
use super::handlers::products::list_products_handler;
use super::handlers::tax_rates::list_effective_rates_handler;

/// Use cases shared by the API route tree
///
/// Built once at startup and cloned into each worker's app factory.
#[derive(Clone)]
pub struct ApiDependencies {
  pub list_clients_use_case: Arc<ListClientsUseCase>,
  pub get_client_use_case: Arc<GetClientUseCase>,
  pub list_products_use_case: Arc<ListProductsUseCase>,
  pub list_effective_rates_use_case: Arc<ListEffectiveRatesUseCase>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub generate_invoice_use_case: Arc<GenerateInvoiceUseCase>,
  pub get_invoice_details_use_case: Arc<GetInvoiceDetailsUseCase>,
}

/// Configure client routes
///
/// Mounts the client endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api/clients).
///
/// # Routes
///
/// - GET / - List all clients
/// - GET /{code} - Get one client by code
pub fn configure_client_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListClientsUseCase>,
  get_use_case: Arc<GetClientUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .route("", web::get().to(list_clients_handler))
    .route("/{code}", web::get().to(get_client_handler));
}

/// Configure product routes
///
/// # Routes
///
/// - GET / - List the product catalog
pub fn configure_product_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListProductsUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .route("", web::get().to(list_products_handler));
}

/// Configure VAT rate routes
///
/// # Routes
///
/// - GET /en-vigueur - List rates effective on a date (today by default)
pub fn configure_tax_rate_routes(
  cfg: &mut web::ServiceConfig,
  effective_rates_use_case: Arc<ListEffectiveRatesUseCase>,
) {
  cfg
    .app_data(web::Data::new(effective_rates_use_case))
    .route("/en-vigueur", web::get().to(list_effective_rates_handler));
}

/// Configure invoice routes
///
/// # Routes
///
/// - GET / - List all invoices
/// - POST /generer - Generate a new invoice
/// - GET /{reference} - Get one invoice with lines and tax breakdown
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListInvoicesUseCase>,
  generate_use_case: Arc<GenerateInvoiceUseCase>,
  details_use_case: Arc<GetInvoiceDetailsUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(generate_use_case))
    .app_data(web::Data::new(details_use_case))
    .route("", web::get().to(list_invoices_handler))
    .route("/generer", web::post().to(generate_invoice_handler))
    .route("/{reference}", web::get().to(get_invoice_details_handler));
}

/// Configure the full API route tree
///
/// Mounts every endpoint under /api.
///
/// # Routes
///
/// - GET /api/clients - List all clients
/// - GET /api/clients/{code} - Get one client by code
/// - GET /api/produits - List the product catalog
/// - GET /api/tva/en-vigueur - List VAT rates effective on a date
/// - GET /api/factures - List all invoices
/// - POST /api/factures/generer - Generate a new invoice
/// - GET /api/factures/{reference} - Get one invoice
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// # use facturier::adapters::http::routes::{ApiDependencies, configure_api_routes};
///
/// # fn example(deps: ApiDependencies) {
/// let app = App::new().configure(|cfg| configure_api_routes(cfg, deps));
/// # }
/// ```
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  cfg
    .service(web::scope("/api/clients").configure(|cfg| {
      configure_client_routes(cfg, deps.list_clients_use_case, deps.get_client_use_case)
    }))
    .service(
      web::scope("/api/produits")
        .configure(|cfg| configure_product_routes(cfg, deps.list_products_use_case)),
    )
    .service(
      web::scope("/api/tva")
        .configure(|cfg| configure_tax_rate_routes(cfg, deps.list_effective_rates_use_case)),
    )
    .service(web::scope("/api/factures").configure(|cfg| {
      configure_invoice_routes(
        cfg,
        deps.list_invoices_use_case,
        deps.generate_invoice_use_case,
        deps.get_invoice_details_use_case,
      )
    }));
}
