//! Bowls Scorer (workspace facade crate).
//!
//! Re-exports the member crates under `bowls_scorer::{core,input,record,term,types}`
//! and hosts the application shell used by the binary.

pub use bowls_scorer_core as core;
pub use bowls_scorer_input as input;
pub use bowls_scorer_record as record;
pub use bowls_scorer_term as term;
pub use bowls_scorer_types as types;

pub mod app;
pub mod config;
