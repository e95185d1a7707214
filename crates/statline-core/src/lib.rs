//! Core types and ingestion logic for the statline season-statistics store.
//!
//! This crate is deliberately free of HTTP, CSV and database dependencies.
//! It owns the field table, the identifier generator, the row normalizer and
//! the [`store::StatStore`] abstraction every backend implements.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod field;
pub mod id;
pub mod normalize;
pub mod stat;
pub mod store;
pub mod subject;

pub use error::{Error, Result};
