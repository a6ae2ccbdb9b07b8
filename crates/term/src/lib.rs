//! Terminal rendering for the scorer.
//!
//! Screens are drawn into a plain framebuffer that is diffed and flushed by
//! [`TerminalRenderer`]. No widget library is involved, so views stay pure and
//! can be asserted on as text.

pub mod fb;
pub mod renderer;
pub mod score_view;

pub use bowls_scorer_core as core;
pub use bowls_scorer_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use score_view::{result_line, Dialog, ScoreView, Screen, Viewport};
