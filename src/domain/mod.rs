pub mod invoicing;

// Single bounded context; surface it at the domain root
pub use invoicing::*;
