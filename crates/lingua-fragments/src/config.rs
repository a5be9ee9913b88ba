use serde::{Deserialize, Serialize};

/// What the renderer does when a fragment starts before the end of the
/// previously rendered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Stop the pass: nothing after the offending fragment is rendered,
    /// including the trailing filler.
    #[default]
    Halt,
    /// Drop only the offending fragment and keep going.
    Skip,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "halt" => Ok(OverlapPolicy::Halt),
            "skip" => Ok(OverlapPolicy::Skip),
            other => Err(format!("unknown overlap policy {other:?}, expected \"halt\" or \"skip\"")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub overlap_policy: OverlapPolicy,
    /// Show phonetic spellings over words that have one.
    pub show_spelling: bool,
}
