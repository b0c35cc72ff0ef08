use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facturier::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_api_routes},
  application::invoicing::{
    GenerateInvoiceUseCase, GetClientUseCase, GetInvoiceDetailsUseCase, ListClientsUseCase,
    ListEffectiveRatesUseCase, ListInvoicesUseCase, ListProductsUseCase,
  },
  domain::invoicing::{InvoiceService, TaxRateResolver},
  infrastructure::{
    config::Config,
    persistence::sqlite::{
      SqliteClientRepository, SqliteInvoiceRepository, SqliteProductRepository,
      SqliteTaxRateRepository,
    },
    seed::seed_demo_data,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "facturier=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Facturier application");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    SqlitePoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to open database: {}", e);
    std::io::Error::other(format!("Database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let client_repo = Arc::new(SqliteClientRepository::new(db_pool.clone()));
  let product_repo = Arc::new(SqliteProductRepository::new(db_pool.clone()));
  let rate_repo = Arc::new(SqliteTaxRateRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(SqliteInvoiceRepository::new(db_pool.clone()));

  // Load the demo dataset on first start
  seed_demo_data(
    client_repo.as_ref(),
    product_repo.as_ref(),
    rate_repo.as_ref(),
  )
  .await
  .expect("Failed to seed demo data");

  // Initialize domain services
  let rate_resolver = Arc::new(TaxRateResolver::new(rate_repo.clone()));
  let invoice_service = Arc::new(InvoiceService::new(
    invoice_repo.clone(),
    client_repo.clone(),
    product_repo.clone(),
    rate_resolver.clone(),
  ));

  // Initialize use cases
  let deps = ApiDependencies {
    list_clients_use_case: Arc::new(ListClientsUseCase::new(invoice_service.clone())),
    get_client_use_case: Arc::new(GetClientUseCase::new(invoice_service.clone())),
    list_products_use_case: Arc::new(ListProductsUseCase::new(invoice_service.clone())),
    list_effective_rates_use_case: Arc::new(ListEffectiveRatesUseCase::new(rate_resolver.clone())),
    list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
    generate_invoice_use_case: Arc::new(GenerateInvoiceUseCase::new(invoice_service.clone())),
    get_invoice_details_use_case: Arc::new(GetInvoiceDetailsUseCase::new(invoice_service.clone())),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Configure API routes
      .configure(|cfg| configure_api_routes(cfg, deps.clone()))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
