//! Error types for fragment mutation and wire decoding.
//!
//! Missing selections or unknown targets are not errors; those mutations
//! return `Ok(None)` or an empty result instead.

use miette::Diagnostic;

use crate::fragment::{FragmentId, FragmentType};
use crate::range::Range;

pub type Result<T, E = FragmentError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum FragmentError {
    /// A range reaches past the end of the root it annotates.
    #[error("range {range} is out of bounds for a root of length {len}")]
    #[diagnostic(code(lingua::fragment::out_of_bounds))]
    OutOfBounds { range: Range, len: usize },

    /// A range bound falls between the two halves of a surrogate pair.
    #[error("range {range} splits a character")]
    #[diagnostic(
        code(lingua::fragment::splits_character),
        help("offsets are UTF-16 code units; move the bound to a character boundary")
    )]
    SplitsCharacter { range: Range },

    /// A fragment does not fit inside the container it is being moved into.
    #[error("could not complete this annotation: {range} does not fit inside {container}")]
    #[diagnostic(
        code(lingua::fragment::does_not_fit),
        help("select text that lies entirely inside the sentence, or cover the whole sentence")
    )]
    DoesNotFit { range: Range, container: Range },

    #[error("a fragment with id {0:?} already exists")]
    #[diagnostic(code(lingua::fragment::duplicate_id))]
    DuplicateId(FragmentId),

    #[error("cannot replace {expected} data with {found} data")]
    #[diagnostic(code(lingua::fragment::variant_mismatch))]
    VariantMismatch {
        expected: FragmentType,
        found: FragmentType,
    },

    #[error("invalid fragment data: {0}")]
    #[diagnostic(code(lingua::fragment::invalid_wire))]
    InvalidWire(String),

    #[error(transparent)]
    #[diagnostic(code(lingua::fragment::json))]
    Json(#[from] serde_json::Error),
}
