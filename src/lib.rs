//! chat-wrapped: parse exported chat transcripts into clean, ordered messages.
//!
//! A chat export is a plain-text file where every message starts with a
//! header line like `5/1/23, 9:05 pm - Alice: hello` and may continue over
//! any number of following lines. This crate turns such a file into a list
//! of [`MessageRecord`]s, dropping media placeholders, `null` bodies and
//! system notices, counting deletion notices, and keeping only the most
//! recent messages.
//!
//! # Quick Start
//!
//! ```rust
//! use chat_wrapped::ChatParser;
//!
//! let input = "5/1/23, 9:05 pm - Alice: hello\nsecond line\n5/1/23, 21:06 - Bob: hi";
//! let transcript = ChatParser::new().parse_str(input);
//!
//! assert_eq!(transcript.len(), 2);
//! assert_eq!(transcript.messages[0].body, "hello\nsecond line");
//! assert_eq!(
//!     transcript.messages[1].to_transcript_line(),
//!     "05/01/23, 21:06 - Bob: hi"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`model`]: Message records, logical blocks and the parsed transcript
//! - [`parser`]: Line prefilter, line reconstructor, message extractor and retention
//! - [`analytics`]: Chat statistics built on parsed messages
//! - [`export`]: Text, JSON and CSV output
//! - [`config`]: Configuration management
//! - [`cli`]: Command-line interface
//! - [`error`]: Error types and exit codes

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod util;

// Re-export commonly used types at the crate root
pub use error::{ChatError, Result};
pub use model::{MessageRecord, Transcript};
pub use parser::ChatParser;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{AnalyticsOptions, ChatAnalytics};
    pub use crate::error::{ChatError, Result};
    pub use crate::export::{export_to_file, export_to_string, ExportFormat, ExportOptions};
    pub use crate::model::{MessageRecord, Transcript};
    pub use crate::parser::{ChatParser, ParseStats};
}
