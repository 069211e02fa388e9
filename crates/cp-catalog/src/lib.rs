//! Reference catalog and cascading selection
//!
//! The catalog is an immutable in-memory table of known car records, loaded
//! once at startup from the reference CSV. Its only job is to answer "which
//! values of attribute X co-occur with the attributes already chosen", the
//! question behind every dependent dropdown on the form.

pub mod record;
pub mod selector;

pub use record::{Catalog, CatalogRecord};
pub use selector::CascadeSelector;
