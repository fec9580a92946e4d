//! Application layer: services and use cases
//!
//! This layer turns loaded settings into tree requests and runs them
//! against the domain.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{TreeRequest, TreeService, Value};
