use serde::Serialize;
use smol_str::SmolStr;

use super::{LeafFragment, LeafKind, RenderCallback, SentenceView};
use crate::dictionary::{DictionaryEntry, DictionaryResolver};
use crate::fragment::{FragmentId, HighlightRole};

/// A renderable span, ready for a UI layer to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderSpan {
    Plain {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Word {
        id: FragmentId,
        text: String,
        dict_id: SmolStr,
        /// `None` when the dictionary has no entry for `dict_id`.
        entry: Option<DictionaryEntry>,
    },
    Mark {
        id: FragmentId,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Note {
        id: FragmentId,
        text: String,
        note: String,
    },
    Highlight {
        id: FragmentId,
        text: String,
        role: HighlightRole,
    },
    Background {
        id: FragmentId,
        text: String,
    },
    Sentence {
        id: FragmentId,
        text: String,
        translation: String,
        children: Vec<RenderSpan>,
    },
}

impl RenderSpan {
    /// The substring this span covers.
    pub fn text(&self) -> &str {
        match self {
            RenderSpan::Plain { text }
            | RenderSpan::Word { text, .. }
            | RenderSpan::Mark { text, .. }
            | RenderSpan::Note { text, .. }
            | RenderSpan::Highlight { text, .. }
            | RenderSpan::Background { text, .. }
            | RenderSpan::Sentence { text, .. } => text,
        }
    }
}

/// Renders [`RenderSpan`]s, resolving Word fragments against a dictionary.
#[derive(Debug, Clone)]
pub struct SpanRenderer<R> {
    resolver: R,
}

impl<R: DictionaryResolver> SpanRenderer<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: DictionaryResolver> RenderCallback for SpanRenderer<R> {
    type Node = RenderSpan;

    fn filler(&mut self, text: &str) -> RenderSpan {
        RenderSpan::Plain { text: text.into() }
    }

    fn leaf(&mut self, text: &str, fragment: LeafFragment<'_>) -> RenderSpan {
        let id = fragment.id.clone();
        let text = text.to_string();
        match fragment.kind {
            LeafKind::Word(word) => {
                let entry = self.resolver.resolve(&word.dict_id).cloned();
                if entry.is_none() {
                    tracing::debug!(target: "lingua::render", dict_id = %word.dict_id, "unresolved dictionary entry");
                }
                RenderSpan::Word {
                    id,
                    text,
                    dict_id: word.dict_id.clone(),
                    entry,
                }
            }
            LeafKind::Mark(mark) => RenderSpan::Mark {
                id,
                text,
                comment: mark.comment.clone(),
                color: mark.color.clone(),
            },
            LeafKind::Note(note) => RenderSpan::Note {
                id,
                text,
                note: note.note.clone(),
            },
            LeafKind::Highlight(role) => RenderSpan::Highlight { id, text, role },
            LeafKind::Background => RenderSpan::Background { id, text },
        }
    }

    fn sentence(&mut self, text: &str, sentence: SentenceView<'_>, children: Vec<RenderSpan>) -> RenderSpan {
        RenderSpan::Sentence {
            id: sentence.id.clone(),
            text: text.into(),
            translation: sentence.translation.into(),
            children,
        }
    }
}
