//! # Application Layer
//!
//! Use cases built on the domain services and the repository ports.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
