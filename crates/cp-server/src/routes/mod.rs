//! HTTP route handlers

pub mod form;
pub mod health;
pub mod options;
pub mod predict;

pub use form::form_page;
pub use health::health;
pub use options::get_options;
pub use predict::predict;
