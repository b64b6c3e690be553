//! # script-clean
//!
//! Normalize language-model generated video scripts into clean plain text.
//!
//! Model output tends to arrive decorated with Markdown (bold markers, code
//! fences, headings) and with numbered points run together on one line. This
//! crate reduces each text block to a canonical form while keeping the line
//! and list structure readers rely on.
//!
//! ## Design
//!
//! Cleaning is an ordered list of named `&str -> String` passes:
//!
//! ```text
//! markdown artifacts ──▶ numbered items ──▶ whitespace ──▶ clean text
//! ```
//!
//! - **Pure**: every pass is a function of its input only, so a single
//!   [`CleanService`] can be shared across threads freely
//! - **Total**: any string (including empty) produces a string, never an error
//! - **Idempotent**: cleaning cleaned text returns it unchanged
//!
//! ## Example (single block)
//!
//! ```rust
//! use script_clean::clean_block;
//!
//! assert_eq!(clean_block(Some("**bold** and _em_")), "bold and em");
//! assert_eq!(clean_block(None), "");
//! ```
//!
//! ## Example (whole document)
//!
//! ```rust
//! use script_clean::shape;
//! use serde_json::json;
//!
//! let shaped = shape(&json!({
//!     "data": { "title": "# **My** Title", "introduction": { "script": "1. Hi 2. Bye" } }
//! }));
//! assert!(shaped.is_success());
//! ```

pub mod document;
mod passes;
pub mod reply;
mod service;
mod shape;
mod utilities;

pub use document::{InvalidPayload, ScriptData, ScriptDocument, Section, ShapedPayload};
pub use passes::{Pass, Passes};
pub use reply::{decode_reply, fallback_document, generation_payload, ScriptRequest};
pub use service::{clean_block, CleanService};
pub use shape::{shape, INVALID_PAYLOAD_TYPE};

/// Error type for script-clean operations
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CleanError>;
