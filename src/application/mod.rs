//! Application layer
//!
//! One use case per file, each wrapping the domain services with a
//! command/response pair that the HTTP adapters consume.

pub mod invoicing;
