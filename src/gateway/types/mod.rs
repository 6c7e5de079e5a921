//! Gateway types module
//!
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`error_codes`]: Standard error code constants
//! - [`ApiJson<T>`]: JSON body extractor whose rejections render as [`AppError`](crate::error::AppError)

pub mod request;
pub mod response;

pub use request::ApiJson;
pub use response::{ApiResponse, error_codes};
