//! Rendering a Fragmentable into an ordered sequence of nodes.
//!
//! The walk itself lives in `processor`; what a node *is* is up to the
//! [`RenderCallback`] passed in. Provided callbacks:
//! - [`PlainText`]: raw substrings, for export
//! - [`SpanRenderer`]: serializable spans with resolved dictionary entries
//! - [`SpellingOverlay`]: ruby-style readings for words that have one

mod plain_output;
mod processor;
mod span_output;
mod spelling_output;


pub use plain_output::PlainText;
pub use processor::render;
pub use span_output::{RenderSpan, SpanRenderer};
pub use spelling_output::{Ruby, SpellingOverlay, to_bracketed};

use crate::config::EngineConfig;
use crate::fragment::{FragmentId, HighlightRole, MarkData, NoteData, WordData};
use crate::fragmentable::Fragmentable;
use crate::range::Range;

/// Leaf payload handed to [`RenderCallback::leaf`].
///
/// Sentences are never leaves; they go through [`RenderCallback::sentence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind<'a> {
    Word(&'a WordData),
    Mark(&'a MarkData),
    Note(&'a NoteData),
    Highlight(HighlightRole),
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafFragment<'a> {
    pub id: &'a FragmentId,
    /// Range in the frame of the root being rendered.
    pub range: Range,
    pub kind: LeafKind<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceView<'a> {
    pub id: &'a FragmentId,
    pub range: Range,
    pub translation: &'a str,
}

/// Builds render nodes for one call site.
pub trait RenderCallback {
    type Node;

    /// Un-annotated text between fragments.
    fn filler(&mut self, text: &str) -> Self::Node;

    fn leaf(&mut self, text: &str, fragment: LeafFragment<'_>) -> Self::Node;

    /// Wrap a sentence whose substring has already been rendered into `children`.
    fn sentence(&mut self, text: &str, sentence: SentenceView<'_>, children: Vec<Self::Node>)
    -> Self::Node;
}

impl<C: RenderCallback + ?Sized> RenderCallback for &mut C {
    type Node = C::Node;

    fn filler(&mut self, text: &str) -> Self::Node {
        (**self).filler(text)
    }

    fn leaf(&mut self, text: &str, fragment: LeafFragment<'_>) -> Self::Node {
        (**self).leaf(text, fragment)
    }

    fn sentence(
        &mut self,
        text: &str,
        sentence: SentenceView<'_>,
        children: Vec<Self::Node>,
    ) -> Self::Node {
        (**self).sentence(text, sentence, children)
    }
}

impl Fragmentable {
    /// Render this Fragmentable with its own highlight override.
    ///
    /// Rendering only reads the fragment collection.
    pub fn render<C: RenderCallback>(&self, config: &EngineConfig, callback: &mut C) -> Vec<C::Node> {
        render(
            &self.root,
            &self.fragments,
            self.highlighted_fragment.as_deref(),
            config,
            callback,
        )
    }
}
