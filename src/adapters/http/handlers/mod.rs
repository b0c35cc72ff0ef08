pub mod clients;
pub mod invoices;
pub mod products;
pub mod tax_rates;
