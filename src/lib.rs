pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use catalog::transform;
pub use error::{CatalogError, ConfigError, StoreError};
