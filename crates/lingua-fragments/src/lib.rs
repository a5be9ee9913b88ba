//! lingua-fragments: typed annotations over plain text, and their rendering.
//!
//! This crate provides:
//! - `Fragmentable` - a text root plus its `Fragment`s (words, sentences,
//!   marks, notes), with sentences carrying their own nested words
//! - Range queries and the mutation API (wrap, unwrap, add, remove, update)
//! - `FragmentAction` / `execute_action` for edits addressed by Fragmentable id
//! - The renderer, generic over a `RenderCallback`
//! - The JSON wire codec and structural validation
//!
//! Everything is synchronous and does no I/O.

pub mod actions;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod execute;
pub mod fragment;
pub mod fragmentable;
pub mod ids;
pub mod layer;
mod mutate;
pub mod query;
pub mod range;
pub mod render;
pub mod text;
pub mod validate;
pub mod wire;

pub use actions::{ActionOutcome, FragmentAction};
pub use config::{EngineConfig, OverlapPolicy};
pub use dictionary::{DictionaryEntry, DictionaryResolver};
pub use error::{FragmentError, Result};
pub use execute::execute_action;
pub use fragment::{
    Fragment, FragmentData, FragmentId, FragmentType, HighlightData, HighlightRole, MarkData,
    NoteData, SentenceData, WordData, WordFragment,
};
pub use fragmentable::{FoundFragment, FragmentLocation, Fragmentable};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use layer::FragmentLayer;
pub use query::{FragmentMatch, IntersectType, WordMatch, fragments_in_range, intersecting, normalize_range};
pub use range::{Range, Selection};
pub use render::{
    LeafFragment, LeafKind, PlainText, RenderCallback, RenderSpan, Ruby, SentenceView, SpanRenderer,
    SpellingOverlay,
};
pub use smol_str::SmolStr;
pub use validate::Issue;
pub use wire::{FragmentWire, FragmentableWire};
