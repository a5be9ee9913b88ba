//! Stored documents: one Fragmentable, or an array of them (one per block).

use std::path::Path;

use lingua_fragments::wire::FragmentableWire;
use lingua_fragments::{FragmentLayer, Fragmentable};

use crate::error::{LinguaError, ParseError};

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub fragmentables: Vec<Fragmentable>,
    /// Stored as a bare object rather than an array.
    single: bool,
}

impl Document {
    pub fn single(fragmentable: Fragmentable) -> Self {
        Self {
            fragmentables: vec![fragmentable],
            single: true,
        }
    }

    pub fn blocks(fragmentables: Vec<Fragmentable>) -> Self {
        Self {
            fragmentables,
            single: false,
        }
    }

    /// Parse stored JSON. `name` labels parse errors.
    ///
    /// Ranges are not checked; see [`Fragmentable::validate`].
    pub fn parse(name: &str, json: &str) -> Result<Self, LinguaError> {
        let parse_err = |err: serde_json::Error| ParseError::json(name, json, &err);
        if json.trim_start().starts_with('[') {
            let wires: Vec<FragmentableWire> = serde_json::from_str(json).map_err(parse_err)?;
            let fragmentables = wires
                .into_iter()
                .map(Fragmentable::from_wire)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Self::blocks(fragmentables))
        } else {
            let wire: FragmentableWire = serde_json::from_str(json).map_err(parse_err)?;
            Ok(Self::single(Fragmentable::from_wire(wire)?))
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LinguaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| LinguaError::io(path, err))?;
        let document = Self::parse(&path.display().to_string(), &json)?;
        tracing::debug!(
            path = %path.display(),
            blocks = document.fragmentables.len(),
            "loaded document"
        );
        Ok(document)
    }

    /// Compact JSON in the shape it was read in.
    pub fn to_json(&self) -> Result<String, LinguaError> {
        let json = match (self.single, self.fragmentables.as_slice()) {
            (true, [only]) => serde_json::to_string(&only.to_wire()),
            _ => {
                let wires: Vec<_> = self.fragmentables.iter().map(Fragmentable::to_wire).collect();
                serde_json::to_string(&wires)
            }
        };
        json.map_err(|err| LinguaError::Fragment(err.into()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LinguaError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|err| LinguaError::io(path, err))
    }

    /// Turn the phonetic spelling overlay on or off for every block.
    pub fn set_show_spelling(&mut self, show: bool) {
        for fragmentable in &mut self.fragmentables {
            fragmentable.show_spelling = show;
        }
    }

    /// The only Fragmentable in the document, if there is exactly one.
    pub fn sole(&self) -> Option<&Fragmentable> {
        match self.fragmentables.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl FragmentLayer for Document {
    fn fragmentable(&self, id: &str) -> Option<&Fragmentable> {
        self.fragmentables.fragmentable(id)
    }

    fn fragmentable_mut(&mut self, id: &str) -> Option<&mut Fragmentable> {
        self.fragmentables.fragmentable_mut(id)
    }
}
