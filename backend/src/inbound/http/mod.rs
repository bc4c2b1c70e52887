//! HTTP inbound adapter exposing the profile REST endpoints.

pub mod error;
pub mod health;
pub mod profile;
pub mod profile_dto;
mod profile_form;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod validation;

pub use error::{ApiResult, ErrorExposure, ErrorResponse};
