//! HTTP client for the external image enhancement service.
//!
//! [`client::EnhancementClient`] performs one multipart `POST` per call,
//! validates the response against the documented contract and classifies
//! failures into [`enhancer_core::error::EnhanceError`] kinds. It implements
//! [`enhancer_core::session::Enhancer`] so a session can drive it.

pub mod client;
pub mod config;
pub mod response;
