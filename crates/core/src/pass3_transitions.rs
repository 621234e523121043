//! Pass 3: Transition collection -- resolve endpoints and triggers and
//! attach each transition to its source state.

use crate::error::ResolutionError;
use crate::ir::Transition;
use crate::pass1_triggers::TriggerTable;
use crate::pass2_states::StateTable;
use crate::records::TransitionRecord;
use tracing::debug;

pub fn collect_transitions(
    records: &[TransitionRecord],
    states: &mut StateTable,
    triggers: &TriggerTable,
) -> Result<(), ResolutionError> {
    for record in records {
        let from = states
            .lookup(&record.from)
            .ok_or_else(|| ResolutionError::UnknownFromState {
                transition: record.to_string(),
                state: record.from.clone(),
            })?;
        let to = states
            .lookup(&record.to)
            .ok_or_else(|| ResolutionError::UnknownToState {
                transition: record.to_string(),
                state: record.to.clone(),
            })?;
        let trigger = if record.trigger.is_empty() {
            None
        } else {
            let id = triggers
                .lookup(&record.trigger)
                .ok_or_else(|| ResolutionError::UnknownTrigger {
                    transition: record.to_string(),
                    trigger: record.trigger.clone(),
                })?;
            Some(id)
        };

        states.states[from.0]
            .transitions
            .push(Transition { from, to, trigger });
    }

    debug!(transitions = records.len(), "pass 3: transitions collected");
    Ok(())
}
