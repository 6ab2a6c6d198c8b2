pub mod batcher;
pub mod casing;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fetcher;
pub mod input;
pub mod models;
pub mod shipment;
pub mod transport;
