//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod exercise;
pub mod extractors;
pub mod health;
pub mod landing;
pub mod state;
pub mod validation;

pub use error::ApiResult;
