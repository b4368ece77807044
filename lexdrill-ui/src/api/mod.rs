//! JSON API for the vocabulary drill service
//!
//! Route assembly lives in [`crate::build_router`]; the submodules here hold
//! the handlers and their request/response types.

pub mod error;
pub mod health;
pub mod mistakes;
pub mod quiz;
pub mod sections;
pub mod vocab;

pub use error::{ApiError, ApiResult};

use serde::Serialize;

/// Uniform acknowledgment body for mutations
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}
