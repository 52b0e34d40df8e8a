//! Image host outbound adapters.
//!
//! Provides a thin HTTP implementation of the `ImageHost` port.

mod cloudinary;
mod dto;

pub use cloudinary::{
    CloudinaryBuildError, CloudinaryCredentials, CloudinaryImageHost, DEFAULT_API_BASE,
};
