//! Match recording module.
//!
//! Turns a finished [`MatchState`](crate::core::MatchState) into the flat text
//! summary the scorer keeps per match, writes it to the match directory, and
//! optionally forwards it to a companion device.
//!
//! - [`summary`]: text rendering and `B<HHmm-dd-MM-yyyy>.txt` naming
//! - [`store`]: saving into a directory
//! - [`sync`]: fire-and-forget companion transfer
//!
//! Failures here never touch match state; the caller logs them and moves on.

pub mod error;
pub mod store;
pub mod summary;
pub mod sync;

pub use bowls_scorer_core as core;
pub use bowls_scorer_types as types;

pub use error::{RecordError, RecordResult};
pub use store::{MatchStore, SavedMatch};
pub use summary::MatchSummary;
pub use sync::{spawn_sync, CompanionLink, DirectoryLink, SyncPayload};
