//! `enhancer-cli` library crate.
//!
//! Terminal presentation layer for the enhancement workflow. Re-exports
//! internal modules for integration testing; the binary entrypoint lives
//! in `main.rs`.

pub mod download;
pub mod report;
pub mod upload;
