#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Live balance-override store and the tuning view that resolves it.
//!
//! A human tuner adjusts numeric knobs between runs; the store validates each
//! write against a param registry so the allocator never observes an invalid
//! value. Systems hold a [`Tuning`] view and re-read effective values on
//! every pool build and pick, so edits take effect without caching hazards.

mod store;
mod tuning;

pub use store::{BalanceError, BalanceStore, ImportError, ParamSpec};
pub use tuning::Tuning;
