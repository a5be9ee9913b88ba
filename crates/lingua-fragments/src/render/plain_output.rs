use super::{LeafFragment, RenderCallback, SentenceView};

/// Plain-text export: every node is the raw substring it covers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl PlainText {
    /// Export the Fragmentable's text as the renderer sees it.
    ///
    /// For well-formed data this is the root unchanged. Truncated passes
    /// return only the part that was rendered.
    pub fn export(nodes: &[String]) -> String {
        nodes.concat()
    }
}

impl RenderCallback for PlainText {
    type Node = String;

    fn filler(&mut self, text: &str) -> String {
        text.to_string()
    }

    fn leaf(&mut self, text: &str, _fragment: LeafFragment<'_>) -> String {
        text.to_string()
    }

    fn sentence(&mut self, _text: &str, _sentence: SentenceView<'_>, children: Vec<String>) -> String {
        children.concat()
    }
}
