//! `config.kdl` for the lingua CLI.
//!
//! ```kdl
//! overlap-policy "skip"
//! show-spelling true
//! dictionary "dict/ja.json"
//! ```
//!
//! Every node is optional. A relative `dictionary` path is resolved against
//! the directory holding the config file.

use std::path::{Path, PathBuf};

use kdl::{KdlDocument, KdlNode, KdlValue};
use lingua_common::LinguaError;
use lingua_fragments::{EngineConfig, OverlapPolicy};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliConfig {
    pub engine: EngineConfig,
    pub dictionary: Option<PathBuf>,
}

impl CliConfig {
    pub fn parse(src: &str) -> Result<Self, LinguaError> {
        let doc: KdlDocument = src
            .parse()
            .map_err(|err: kdl::KdlError| LinguaError::Config(err.to_string()))?;

        let mut config = CliConfig::default();
        for node in doc.nodes() {
            match node.name().value() {
                "overlap-policy" => {
                    config.engine.overlap_policy = string_arg(node)?
                        .parse::<OverlapPolicy>()
                        .map_err(LinguaError::Config)?;
                }
                "show-spelling" => {
                    config.engine.show_spelling = first_arg(node)?
                        .as_bool()
                        .ok_or_else(|| expected(node, "true or false"))?;
                }
                "dictionary" => config.dictionary = Some(PathBuf::from(string_arg(node)?)),
                other => tracing::warn!(node = other, "ignoring unknown config node"),
            }
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, LinguaError> {
        let src = std::fs::read_to_string(path).map_err(|err| LinguaError::io(path, err))?;
        let mut config = Self::parse(&src)
            .map_err(|err| LinguaError::Config(format!("{}: {err}", path.display())))?;
        if let (Some(dict), Some(dir)) = (&config.dictionary, path.parent()) {
            if dict.is_relative() {
                config.dictionary = Some(dir.join(dict));
            }
        }
        Ok(config)
    }

    /// `$CONFIG/lingua/config.kdl`, when it exists.
    pub fn default_path() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("lingua").join("config.kdl");
        path.exists().then_some(path)
    }
}

fn first_arg(node: &KdlNode) -> Result<&KdlValue, LinguaError> {
    node.entries()
        .iter()
        .find(|entry| entry.name().is_none())
        .map(|entry| entry.value())
        .ok_or_else(|| LinguaError::Config(format!("`{}` needs a value", node.name().value())))
}

fn string_arg(node: &KdlNode) -> Result<&str, LinguaError> {
    first_arg(node)?
        .as_string()
        .ok_or_else(|| expected(node, "a string"))
}

fn expected(node: &KdlNode, what: &str) -> LinguaError {
    LinguaError::Config(format!("`{}` expects {what}", node.name().value()))
}
