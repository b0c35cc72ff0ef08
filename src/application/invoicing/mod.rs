pub mod generate_invoice;
pub mod get_client;
pub mod get_invoice_details;
pub mod list_clients;
pub mod list_effective_rates;
pub mod list_invoices;
pub mod list_products;

pub use generate_invoice::{
  GenerateInvoiceCommand, GenerateInvoiceLineDto, GenerateInvoiceResponse, GenerateInvoiceUseCase,
  TaxTotalSummaryDto,
};
pub use get_client::{ClientDetailsResponse, GetClientCommand, GetClientUseCase};
pub use get_invoice_details::{
  GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, InvoiceDetailsResponse, InvoiceLineDto,
  TaxTotalDto,
};
pub use list_clients::{ClientListItemDto, ListClientsResponse, ListClientsUseCase};
pub use list_effective_rates::{
  EffectiveRateDto, ListEffectiveRatesCommand, ListEffectiveRatesResponse,
  ListEffectiveRatesUseCase,
};
pub use list_invoices::{InvoiceListItemDto, ListInvoicesResponse, ListInvoicesUseCase};
pub use list_products::{ListProductsResponse, ListProductsUseCase, ProductListItemDto};
