use smol_str::format_smolstr;

use super::{LeafFragment, LeafKind, RenderCallback, SentenceView};
use crate::config::{EngineConfig, OverlapPolicy};
use crate::fragment::{Fragment, FragmentData, FragmentId, HighlightData, HighlightRole, WordFragment};
use crate::range::Range;
use crate::text::Utf16Index;

/// Something the walk can place: a top-level fragment or a sentence's word.
#[derive(Debug, Clone, Copy)]
enum Item<'a> {
    Fragment(&'a Fragment),
    Word(&'a WordFragment),
}

impl<'a> Item<'a> {
    fn range(&self) -> Range {
        match self {
            Item::Fragment(f) => f.range,
            Item::Word(w) => w.range,
        }
    }

    fn id(&self) -> &'a FragmentId {
        match self {
            Item::Fragment(f) => &f.id,
            Item::Word(w) => &w.id,
        }
    }
}

/// Render `root` with `fragments` into an ordered list of nodes.
///
/// When `highlight` names an existing fragment (top level or nested), the
/// pass renders three synthetic fragments instead: a Highlight over it and a
/// Background on either side. The real fragments are not touched.
///
/// Filler nodes cover every gap, so for well-formed input the node texts
/// concatenate back to `root`. Malformed input (overlapping fragments,
/// ranges that cannot be sliced out of the root) is truncated according to
/// `config.overlap_policy` instead of failing.
pub fn render<C: RenderCallback>(
    root: &str,
    fragments: &[Fragment],
    highlight: Option<&str>,
    config: &EngineConfig,
    callback: &mut C,
) -> Vec<C::Node> {
    let index = Utf16Index::new(root);

    if let Some(overlay) = highlight.and_then(|id| highlight_overlay(id, fragments, index.len())) {
        let items = overlay.iter().map(Item::Fragment).collect();
        return render_items(&index, items, config, callback);
    }

    let items = fragments.iter().map(Item::Fragment).collect();
    render_items(&index, items, config, callback)
}

/// The three synthetic fragments for a "dim everything except this" pass.
fn highlight_overlay(id: &str, fragments: &[Fragment], root_len: usize) -> Option<[Fragment; 3]> {
    let target = find_global_range(id, fragments)?;
    let id = FragmentId::from(id);
    // Ordered so the stable sort keeps an empty leading background first.
    Some([
        Fragment::new(
            format_smolstr!("{id}:before"),
            Range::new(0, target.start),
            FragmentData::Background,
        ),
        Fragment::new(
            id.clone(),
            target,
            FragmentData::Highlight(HighlightData {
                role: HighlightRole::Highlight,
            }),
        ),
        Fragment::new(
            format_smolstr!("{id}:after"),
            Range::new(target.end, root_len),
            FragmentData::Background,
        ),
    ])
}

fn find_global_range(id: &str, fragments: &[Fragment]) -> Option<Range> {
    fragments.iter().find_map(|f| {
        if f.id == id {
            return Some(f.range);
        }
        f.as_sentence()?
            .words
            .iter()
            .find(|w| w.id == id)
            .and_then(|w| w.range.shift(f.range.start))
    })
}

fn render_items<C: RenderCallback>(
    index: &Utf16Index<'_>,
    mut items: Vec<Item<'_>>,
    config: &EngineConfig,
    callback: &mut C,
) -> Vec<C::Node> {
    // Stable: fragments starting at the same offset keep collection order.
    items.sort_by_key(|item| item.range().start);

    let mut nodes = Vec::with_capacity(items.len() * 2 + 1);
    let mut position = 0;

    for item in items {
        let range = item.range();

        let slices = if position > range.start {
            None
        } else {
            index
                .slice(Range::new(position, range.start))
                .zip(index.slice(range))
        };
        let Some((gap, text)) = slices else {
            tracing::warn!(
                target: "lingua::render",
                fragment = %item.id(),
                range = %range,
                position,
                root_len = index.len(),
                policy = ?config.overlap_policy,
                "fragment overlaps a previous one or lies outside the root"
            );
            match config.overlap_policy {
                OverlapPolicy::Halt => return nodes,
                OverlapPolicy::Skip => continue,
            }
        };

        if !gap.is_empty() {
            nodes.push(callback.filler(gap));
        }
        tracing::trace!(target: "lingua::render", fragment = %item.id(), range = %range, "render fragment");
        nodes.push(render_item(item, text, range, config, callback));
        position = range.end;
    }

    if position < index.len() {
        if let Some(rest) = index.slice(Range::new(position, index.len())) {
            nodes.push(callback.filler(rest));
        }
    }

    nodes
}

fn render_item<C: RenderCallback>(
    item: Item<'_>,
    text: &str,
    range: Range,
    config: &EngineConfig,
    callback: &mut C,
) -> C::Node {
    let fragment = match item {
        Item::Word(word) => {
            return callback.leaf(
                text,
                LeafFragment {
                    id: &word.id,
                    range,
                    kind: LeafKind::Word(&word.data),
                },
            );
        }
        Item::Fragment(fragment) => fragment,
    };

    let kind = match &fragment.data {
        FragmentData::Word(data) => LeafKind::Word(data),
        FragmentData::Mark(data) => LeafKind::Mark(data),
        FragmentData::Note(data) => LeafKind::Note(data),
        FragmentData::Highlight(data) => LeafKind::Highlight(data.role),
        FragmentData::Background => LeafKind::Background,
        FragmentData::Sentence(sentence) => {
            let sub = Utf16Index::new(text);
            let words = sentence.words.iter().map(Item::Word).collect();
            let children = render_items(&sub, words, config, callback);
            return callback.sentence(
                text,
                SentenceView {
                    id: &fragment.id,
                    range,
                    translation: &sentence.translation,
                },
                children,
            );
        }
    };

    callback.leaf(
        text,
        LeafFragment {
            id: &fragment.id,
            range,
            kind,
        },
    )
}
