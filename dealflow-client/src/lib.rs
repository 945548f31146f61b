//! Dealflow Client - REST transport to the record-storage service
//!
//! The record store is an external collaborator behind a plain CRUD
//! contract; this crate speaks it over HTTP. `RemoteStore` adapts the
//! transport to the `RecordStore` trait so application code never sees
//! reqwest.

pub mod config;
pub mod error;
pub mod remote;
pub mod rest;
pub mod telemetry;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use remote::RemoteStore;
pub use rest::RestClient;
