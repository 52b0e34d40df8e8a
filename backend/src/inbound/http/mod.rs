//! HTTP inbound adapter: board pages, form endpoints and the JSON read API.

pub mod admin;
pub mod claims;
pub mod error;
pub mod health;
pub mod inventory;
pub mod pages;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
