//! Core domain types for Volley.
//!
//! This crate contains pure domain types with no IO and minimal dependencies:
//! call identifiers, timing records, call results, and the wait policy. It
//! never spawns a thread itself; the machinery that does lives in
//! `volley-core`.

mod id;
mod policy;
mod result;
mod timing;

pub use id::CallId;
pub use policy::{SleepInterval, WaitPolicy};
pub use result::CallResult;
pub use timing::Timing;
