//! Fragment id sources.
//!
//! The engine never invents ids on its own; every mutation that creates a
//! fragment takes an [`IdGenerator`] from the caller.

use rand::Rng;
use rand::distr::Alphanumeric;
use smol_str::{SmolStr, format_smolstr};

use crate::fragment::FragmentId;

pub trait IdGenerator {
    fn generate(&mut self) -> FragmentId;
}

impl<F: FnMut() -> FragmentId> IdGenerator for F {
    fn generate(&mut self) -> FragmentId {
        self()
    }
}

/// Random 21-character alphanumeric ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

const RANDOM_ID_LEN: usize = 21;

impl IdGenerator for RandomIds {
    fn generate(&mut self) -> FragmentId {
        let id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_ID_LEN)
            .map(char::from)
            .collect();
        SmolStr::from(id)
    }
}

/// Deterministic `{prefix}{n}` ids.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: SmolStr,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<SmolStr>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("f")
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> FragmentId {
        let id = format_smolstr!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
