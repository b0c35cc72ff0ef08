//! Common test utilities for the HTTP API integration tests.

#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

use facturier::adapters::http::ApiDependencies;
use facturier::application::invoicing::{
  GenerateInvoiceUseCase, GetClientUseCase, GetInvoiceDetailsUseCase, ListClientsUseCase,
  ListEffectiveRatesUseCase, ListInvoicesUseCase, ListProductsUseCase,
};
use facturier::domain::invoicing::{InvoiceService, TaxRateResolver};
use facturier::infrastructure::persistence::sqlite::{
  SqliteClientRepository, SqliteInvoiceRepository, SqliteProductRepository,
  SqliteTaxRateRepository,
};
use facturier::infrastructure::seed::seed_demo_data;

/// A seeded in-memory store plus the dependency graph wired over it.
pub struct TestApp {
  pub pool: SqlitePool,
  pub deps: ApiDependencies,
}

/// Build a fresh application against an in-memory SQLite store.
///
/// The store is migrated and seeded with the demo dataset, so every test
/// starts from the same catalog: client CU2203-0005 and products A-D.
pub async fn spawn_app() -> TestApp {
  // One connection only: each connection to sqlite::memory: would open
  // its own empty database
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to open in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  let client_repo = Arc::new(SqliteClientRepository::new(pool.clone()));
  let product_repo = Arc::new(SqliteProductRepository::new(pool.clone()));
  let rate_repo = Arc::new(SqliteTaxRateRepository::new(pool.clone()));
  let invoice_repo = Arc::new(SqliteInvoiceRepository::new(pool.clone()));

  seed_demo_data(
    client_repo.as_ref(),
    product_repo.as_ref(),
    rate_repo.as_ref(),
  )
  .await
  .expect("Failed to seed demo data");

  let rate_resolver = Arc::new(TaxRateResolver::new(rate_repo.clone()));
  let invoice_service = Arc::new(InvoiceService::new(
    invoice_repo.clone(),
    client_repo.clone(),
    product_repo.clone(),
    rate_resolver.clone(),
  ));

  let deps = ApiDependencies {
    list_clients_use_case: Arc::new(ListClientsUseCase::new(invoice_service.clone())),
    get_client_use_case: Arc::new(GetClientUseCase::new(invoice_service.clone())),
    list_products_use_case: Arc::new(ListProductsUseCase::new(invoice_service.clone())),
    list_effective_rates_use_case: Arc::new(ListEffectiveRatesUseCase::new(rate_resolver.clone())),
    list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
    generate_invoice_use_case: Arc::new(GenerateInvoiceUseCase::new(invoice_service.clone())),
    get_invoice_details_use_case: Arc::new(GetInvoiceDetailsUseCase::new(invoice_service.clone())),
  };

  TestApp { pool, deps }
}

/// Generation payload against the seeded client; tests override fields
/// through the returned `serde_json::Value`.
pub fn facture_payload(lignes: serde_json::Value) -> serde_json::Value {
  serde_json::json!({
    "codeClient": "CU2203-0005",
    "dateFacturation": "2024-06-01",
    "dateEcheance": "2024-07-01",
    "conditionsReglement": "Règlement à la livraison",
    "lignes": lignes
  })
}
