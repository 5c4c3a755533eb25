//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod openroute_adapter;

pub use openroute_adapter::OpenRouteAdapter;
