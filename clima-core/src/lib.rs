//! Core library for the `clima` CLI.
//!
//! This crate defines:
//! - Configuration for the remote document store
//! - Abstraction over document stores, plus the Firestore implementation
//! - The lookup form: input validation, the filtered read, and the
//!   presentation state it produces
//!
//! It is used by `clima-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod query;
pub mod store;

pub use config::Config;
pub use model::{DisplayRow, QueryInput, WeatherRecord, display_rows};
pub use query::{QueryError, QueryForm, QueryState};
pub use store::{Document, DocumentStore, FieldFilter, store_from_config};
