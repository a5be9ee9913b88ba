//! JSON wire shape for stored Fragmentables.
//!
//! ```json
//! {"id":"p1","root":"The cat sat","fragments":[
//!   {"id":"w1","type":"Word","range":{"start":4,"end":7},"data":{"dictId":"cat"}}
//! ]}
//! ```
//!
//! Saving writes fields in the order they are read, and nested sentence
//! words keep their sentence-local ranges. Loading never checks ranges
//! against the root: data from an older, buggy save must still open, and the
//! renderer copes with it.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{FragmentError, Result};
use crate::fragment::{
    Fragment, FragmentData, FragmentId, FragmentType, HighlightData, MarkData, NoteData,
    SentenceData, WordData, WordFragment,
};
use crate::fragmentable::Fragmentable;
use crate::range::Range;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentableWire {
    pub id: SmolStr,
    pub root: String,
    #[serde(default)]
    pub fragments: Vec<FragmentWire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFragment")]
pub struct FragmentWire {
    pub id: FragmentId,
    #[serde(rename = "type")]
    pub ty: FragmentType,
    pub range: Range,
    /// Absent for Background.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WireData>,
}

/// Typed payload. Only ever serialized untagged; reading goes through
/// the raw `data` value so the `type` field picks the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireData {
    Word(WordData),
    Sentence(SentenceWire),
    Mark(MarkData),
    Note(NoteData),
    Highlight(HighlightData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceWire {
    pub translation: String,
    #[serde(default)]
    pub words: Vec<FragmentWire>,
}

#[derive(Deserialize)]
struct RawFragment {
    id: FragmentId,
    #[serde(rename = "type")]
    ty: FragmentType,
    range: Range,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl TryFrom<RawFragment> for FragmentWire {
    type Error = FragmentError;

    fn try_from(raw: RawFragment) -> Result<Self> {
        let payload = || {
            raw.data
                .clone()
                .ok_or_else(|| FragmentError::InvalidWire(format!("{} fragment {:?} has no data", raw.ty, raw.id)))
        };
        let data = match raw.ty {
            FragmentType::Background => None,
            FragmentType::Mark => Some(WireData::Mark(serde_json::from_value(payload()?)?)),
            FragmentType::Word => Some(WireData::Word(serde_json::from_value(payload()?)?)),
            FragmentType::Sentence => Some(WireData::Sentence(serde_json::from_value(payload()?)?)),
            FragmentType::Note => Some(WireData::Note(serde_json::from_value(payload()?)?)),
            FragmentType::Highlight => Some(WireData::Highlight(serde_json::from_value(payload()?)?)),
        };
        Ok(FragmentWire {
            id: raw.id,
            ty: raw.ty,
            range: raw.range,
            data,
        })
    }
}

impl From<&Fragment> for FragmentWire {
    fn from(fragment: &Fragment) -> Self {
        let data = match &fragment.data {
            FragmentData::Word(word) => Some(WireData::Word(word.clone())),
            FragmentData::Sentence(sentence) => Some(WireData::Sentence(SentenceWire {
                translation: sentence.translation.clone(),
                words: sentence.words.iter().map(FragmentWire::from).collect(),
            })),
            FragmentData::Mark(mark) => Some(WireData::Mark(mark.clone())),
            FragmentData::Note(note) => Some(WireData::Note(note.clone())),
            FragmentData::Highlight(highlight) => Some(WireData::Highlight(*highlight)),
            FragmentData::Background => None,
        };
        FragmentWire {
            id: fragment.id.clone(),
            ty: fragment.fragment_type(),
            range: fragment.range,
            data,
        }
    }
}

impl From<&WordFragment> for FragmentWire {
    fn from(word: &WordFragment) -> Self {
        FragmentWire {
            id: word.id.clone(),
            ty: FragmentType::Word,
            range: word.range,
            data: Some(WireData::Word(word.data.clone())),
        }
    }
}

impl TryFrom<FragmentWire> for Fragment {
    type Error = FragmentError;

    fn try_from(wire: FragmentWire) -> Result<Self> {
        let data = match (wire.ty, wire.data) {
            (FragmentType::Background, _) => FragmentData::Background,
            (FragmentType::Word, Some(WireData::Word(word))) => FragmentData::Word(word),
            (FragmentType::Mark, Some(WireData::Mark(mark))) => FragmentData::Mark(mark),
            (FragmentType::Note, Some(WireData::Note(note))) => FragmentData::Note(note),
            (FragmentType::Highlight, Some(WireData::Highlight(h))) => FragmentData::Highlight(h),
            (FragmentType::Sentence, Some(WireData::Sentence(sentence))) => {
                let words = sentence
                    .words
                    .into_iter()
                    .map(|word| {
                        Fragment::try_from(word).and_then(|fragment| {
                            WordFragment::try_from(fragment).map_err(|other| {
                                FragmentError::InvalidWire(format!(
                                    "sentence {:?} holds {} fragment {:?}; only words may nest",
                                    wire.id,
                                    other.fragment_type(),
                                    other.id
                                ))
                            })
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                FragmentData::Sentence(SentenceData {
                    translation: sentence.translation,
                    words,
                })
            }
            (ty, _) => {
                return Err(FragmentError::InvalidWire(format!(
                    "{ty} fragment {:?} carries a payload of another type",
                    wire.id
                )));
            }
        };
        Ok(Fragment {
            id: wire.id,
            range: wire.range,
            data,
        })
    }
}

impl Fragmentable {
    pub fn from_wire(wire: FragmentableWire) -> Result<Self> {
        let fragments = wire
            .fragments
            .into_iter()
            .map(Fragment::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Fragmentable::new(wire.id, wire.root).with_fragments(fragments))
    }

    /// The stored shape. Session state (highlight, spelling toggle) is not
    /// part of it.
    pub fn to_wire(&self) -> FragmentableWire {
        FragmentableWire {
            id: self.id.clone(),
            root: self.root.clone(),
            fragments: self.fragments.iter().map(FragmentWire::from).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let wire: FragmentableWire = serde_json::from_str(json)?;
        Self::from_wire(wire)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_wire())?)
    }
}
