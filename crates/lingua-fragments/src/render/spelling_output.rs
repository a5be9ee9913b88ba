use super::{LeafFragment, LeafKind, RenderCallback, SentenceView};
use crate::dictionary::DictionaryResolver;

/// A run of text with an optional reading shown above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruby {
    pub base: String,
    pub annotation: Option<String>,
}

impl Ruby {
    fn plain(text: &str) -> Self {
        Self {
            base: text.to_string(),
            annotation: None,
        }
    }
}

/// Emits ruby annotations for words whose dictionary entry has a phonetic
/// spelling. Everything else, sentences included, flattens to plain runs.
#[derive(Debug, Clone)]
pub struct SpellingOverlay<R> {
    resolver: R,
}

impl<R: DictionaryResolver> SpellingOverlay<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: DictionaryResolver> RenderCallback for SpellingOverlay<R> {
    type Node = Vec<Ruby>;

    fn filler(&mut self, text: &str) -> Vec<Ruby> {
        vec![Ruby::plain(text)]
    }

    fn leaf(&mut self, text: &str, fragment: LeafFragment<'_>) -> Vec<Ruby> {
        let annotation = match fragment.kind {
            LeafKind::Word(word) => self
                .resolver
                .resolve(&word.dict_id)
                .and_then(|entry| entry.spelling.clone())
                .filter(|spelling| !spelling.is_empty()),
            LeafKind::Mark(_) | LeafKind::Note(_) | LeafKind::Highlight(_) | LeafKind::Background => None,
        };
        vec![Ruby {
            base: text.to_string(),
            annotation,
        }]
    }

    fn sentence(&mut self, _text: &str, _sentence: SentenceView<'_>, children: Vec<Vec<Ruby>>) -> Vec<Ruby> {
        children.into_iter().flatten().collect()
    }
}

/// Flatten rendered runs into `base[reading]` text.
pub fn to_bracketed(nodes: &[Vec<Ruby>]) -> String {
    let mut out = String::new();
    for ruby in nodes.iter().flatten() {
        out.push_str(&ruby.base);
        if let Some(annotation) = &ruby.annotation {
            out.push('[');
            out.push_str(annotation);
            out.push(']');
        }
    }
    out
}
