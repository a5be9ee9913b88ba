//! Annotation actions.
//!
//! `FragmentAction` describes one user-driven change to a Fragmentable,
//! decoupled from how the editor triggered it.

use crate::fragment::{Fragment, FragmentData, FragmentId, FragmentType};
use crate::range::Range;

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentAction {
    /// Annotate the selection with a new fragment.
    Wrap {
        selection: Option<Range>,
        data: FragmentData,
    },

    /// Strip fragments of one type from the selection.
    Unwrap {
        selection: Option<Range>,
        ty: FragmentType,
    },

    Add { fragment: Fragment },

    Remove { id: FragmentId },

    Update { id: FragmentId, data: FragmentData },

    /// Set (`Some`) or clear (`None`) the render override.
    Highlight { id: Option<FragmentId> },
}

/// What an executed action did.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Nothing to do: no selection, no layer, unknown target or unknown id.
    Noop,
    Created(FragmentId),
    Unwrapped(Vec<Fragment>),
    Removed(Fragment),
    /// Holds the payload that was replaced.
    Updated(FragmentData),
    Highlighted(Option<FragmentId>),
}

impl ActionOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, ActionOutcome::Noop)
    }
}
