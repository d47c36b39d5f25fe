//! Core of the rate → enhance → re-rate workflow.
//!
//! Holds everything that does not touch the network: the image reference
//! codec, the enhancement result model, the workflow state machine, the
//! in-memory history ledger, and the [`session::Session`] driver that runs
//! the one suspending transition against an [`session::Enhancer`].

pub mod codec;
pub mod error;
pub mod history;
pub mod result;
pub mod session;
pub mod workflow;
