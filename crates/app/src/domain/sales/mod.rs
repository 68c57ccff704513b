//! Sales

pub mod errors;
mod repository;
pub mod service;

pub use errors::SalesServiceError;
pub use service::*;
