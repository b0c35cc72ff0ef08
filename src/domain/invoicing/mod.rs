pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{
  Client, Invoice, InvoiceLine, InvoiceTaxTotal, InvoiceTotals, InvoiceWithClient, Product,
  TaxRate,
};
pub use errors::InvoiceError;
pub use ports::{ClientRepository, InvoiceRepository, ProductRepository, TaxRateRepository};
pub use services::{GenerateInvoiceData, InvoiceService, TaxRateResolver};
pub use value_objects::{
  ClientCode, ClientName, Designation, InvoiceReference, PaymentTerms, Quantity, UnitPrice,
  ValueObjectError, VatRate,
};
