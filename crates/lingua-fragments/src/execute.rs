//! Action execution against a [`FragmentLayer`].
//!
//! `execute_action` is the central dispatch point for annotation changes.
//! The caller serializes calls; each one fully applies before returning.

use crate::actions::{ActionOutcome, FragmentAction};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::layer::FragmentLayer;

/// Apply `action` to the Fragmentable `target` inside `layer`.
///
/// A missing layer or unknown target yields `ActionOutcome::Noop`. Only
/// structural problems (a fragment that does not fit where it is being put,
/// an out-of-bounds range, a duplicate id, a variant change) are errors, and
/// they leave the Fragmentable unchanged.
pub fn execute_action<L: FragmentLayer + ?Sized>(
    layer: &mut L,
    target: &str,
    action: FragmentAction,
    ids: &mut impl IdGenerator,
) -> Result<ActionOutcome> {
    let Some(fragmentable) = layer.fragmentable_mut(target) else {
        tracing::trace!(target: "lingua::mutate", %target, "no fragmentable for action");
        return Ok(ActionOutcome::Noop);
    };

    let outcome = match action {
        FragmentAction::Wrap { selection, data } => fragmentable
            .wrap_selection(selection, data, ids)?
            .map_or(ActionOutcome::Noop, ActionOutcome::Created),
        FragmentAction::Unwrap { selection, ty } => {
            let unwrapped = fragmentable.unwrap_selection(selection, ty);
            if unwrapped.is_empty() {
                ActionOutcome::Noop
            } else {
                ActionOutcome::Unwrapped(unwrapped)
            }
        }
        FragmentAction::Add { fragment } => {
            ActionOutcome::Created(fragmentable.add_fragment(fragment)?)
        }
        FragmentAction::Remove { id } => fragmentable
            .remove_fragment(&id)
            .map_or(ActionOutcome::Noop, ActionOutcome::Removed),
        FragmentAction::Update { id, data } => fragmentable
            .update_fragment(&id, data)?
            .map_or(ActionOutcome::Noop, ActionOutcome::Updated),
        FragmentAction::Highlight { id: Some(id) } => {
            if fragmentable.set_highlight(&id) {
                ActionOutcome::Highlighted(Some(id))
            } else {
                ActionOutcome::Noop
            }
        }
        FragmentAction::Highlight { id: None } => {
            fragmentable.clear_highlight();
            ActionOutcome::Highlighted(None)
        }
    };
    Ok(outcome)
}
