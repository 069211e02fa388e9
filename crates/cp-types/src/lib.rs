//! Shared types and error taxonomy for carprice

pub mod errors;
pub mod selection;

pub use errors::{AppError, AppResult};
pub use selection::{CatalogField, Selection, CASCADE_ORDER};
