//! coda-protocol: Shared definitions for the coda reply-watching pipeline
//!
//! This crate defines the data types exchanged between the coda engine and
//! its consumers: document identity and metadata, idle events emitted by the
//! detector, and the structured results produced by the command extractor.

pub mod dialect;
pub mod document;
pub mod event;
pub mod extract;

// Re-export main types at crate root
pub use dialect::{DialectParseError, ShellDialect};
pub use document::{DocumentId, DocumentMeta, DocumentSnapshot};
pub use event::IdleEvent;
pub use extract::{Extraction, FencedBlock, ReplyNotification};
