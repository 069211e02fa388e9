pub mod error;

pub use error::{ApiErrorResponse, ApiResult};
