//! # Domain Layer
//!
//! Entities, value objects and pure decision services.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
