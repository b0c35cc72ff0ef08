pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ClientResponse, ClientSummaryResponse, EnVigueurQuery, ErrorResponse, FactureDetailsResponse,
  FactureSummaryResponse, GenererFactureRequest, GenererFactureResponse, LigneFactureRequest,
  LigneFactureResponse, ProduitResponse, TauxTvaResponse, TotalTvaResponse,
};
pub use errors::{ApiError, NotFoundKind};
pub use middleware::{RequestId, RequestIdMiddleware};
pub use routes::{
  ApiDependencies, configure_api_routes, configure_client_routes, configure_invoice_routes,
  configure_product_routes, configure_tax_rate_routes,
};
