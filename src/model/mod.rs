//! Data model for parsed chat transcripts.
//!
//! A transcript moves through three shapes:
//! - raw physical lines (plain `&str`, no meaning until classified)
//! - [`LogicalBlock`]s, one per candidate message, possibly multi-line
//! - [`MessageRecord`]s, the validated output consumed by analytics and export
//!
//! [`Transcript`] bundles the final records with the side counters the
//! parser collects along the way.

pub mod block;
pub mod message;
pub mod transcript;

pub use block::*;
pub use message::*;
pub use transcript::*;
