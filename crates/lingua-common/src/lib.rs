//! lingua-common: shared plumbing for lingua binaries.
//!
//! Error reporting, stored documents, the file-backed dictionary and (with
//! the `telemetry` feature) tracing setup. The engine itself lives in
//! `lingua-fragments` and does no I/O.

pub mod dictionary;
pub mod document;
pub mod error;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use crate::dictionary::DictionaryStore;
pub use crate::document::Document;
pub use crate::error::{LinguaError, ParseError};
