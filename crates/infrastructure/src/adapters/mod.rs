//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod oba_arrivals_adapter;

pub use oba_arrivals_adapter::ObaArrivalsAdapter;
