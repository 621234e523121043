//! Pass 2: State collection -- create every state, link the hierarchy, then
//! resolve enter/exit reactions.
//!
//! Creation and linking are separate sweeps so a child may be declared
//! before or after its parent. Linking rejects parent cycles as it goes:
//! the already-linked part of the hierarchy is always a forest, so walking
//! up from the prospective parent either reaches a root or reaches the
//! child itself.

use crate::error::{ReactionKind, ResolutionError};
use crate::ir::{State, StateId, TriggerId};
use crate::pass1_triggers::TriggerTable;
use crate::records::{ReactionRecord, StateRecord};
use std::collections::HashMap;
use tracing::{debug, trace};

/// States produced by Pass 2, without transitions.
#[derive(Debug, Default)]
pub struct StateTable {
    pub states: Vec<State>,
    pub roots: Vec<StateId>,
    pub by_name: HashMap<String, StateId>,
}

impl StateTable {
    pub fn lookup(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }
}

pub fn collect_states(
    records: &[StateRecord],
    triggers: &TriggerTable,
) -> Result<StateTable, ResolutionError> {
    let mut table = create_states(records)?;
    link_hierarchy(&mut table, records)?;
    resolve_reactions(&mut table, records, triggers)?;
    debug!(
        states = table.states.len(),
        roots = table.roots.len(),
        "pass 2: states collected"
    );
    Ok(table)
}

fn create_states(records: &[StateRecord]) -> Result<StateTable, ResolutionError> {
    let mut table = StateTable::default();
    for record in records {
        if table.by_name.contains_key(&record.name) {
            return Err(ResolutionError::DuplicateState {
                name: record.name.clone(),
            });
        }
        let id = StateId(table.states.len());
        table.by_name.insert(record.name.clone(), id);
        table.states.push(State::bare(&record.name, record.initial));
    }
    Ok(table)
}

fn link_hierarchy(table: &mut StateTable, records: &[StateRecord]) -> Result<(), ResolutionError> {
    // Records and states share indices after create_states.
    for (index, record) in records.iter().enumerate() {
        let id = StateId(index);
        if record.parent.is_empty() {
            table.roots.push(id);
            continue;
        }

        let Some(parent) = table.lookup(&record.parent) else {
            return Err(ResolutionError::UnexistentParent {
                state: record.name.clone(),
                parent: record.parent.clone(),
            });
        };

        if table.states[parent.0].is_parent_of(id) {
            return Err(ResolutionError::AlreadyChild {
                parent: record.parent.clone(),
                child: record.name.clone(),
            });
        }

        check_cycle(table, id, parent)?;

        trace!(state = %record.name, parent = %record.parent, "link");
        table.states[parent.0].children.push(id);
        table.states[id.0].parent = Some(parent);
    }
    Ok(())
}

/// Fail if `child` is `parent` or one of its linked ancestors.
fn check_cycle(table: &StateTable, child: StateId, parent: StateId) -> Result<(), ResolutionError> {
    let name = |id: StateId| table.states[id.0].name.clone();
    let mut path = vec![name(child), name(parent)];
    let mut cur = Some(parent);
    while let Some(node) = cur {
        if node == child {
            return Err(ResolutionError::ParentCycle {
                state: name(child),
                path,
            });
        }
        cur = table.states[node.0].parent;
        if let Some(next) = cur {
            path.push(name(next));
        }
    }
    Ok(())
}

fn resolve_reactions(
    table: &mut StateTable,
    records: &[StateRecord],
    triggers: &TriggerTable,
) -> Result<(), ResolutionError> {
    for (index, record) in records.iter().enumerate() {
        let enter = resolve_reaction_list(record, &record.enter, ReactionKind::Enter, triggers)?;
        let exit = resolve_reaction_list(record, &record.exit, ReactionKind::Exit, triggers)?;

        let state = &mut table.states[index];
        state.default_enter = record.enter.default;
        state.enter_reactions = enter;
        state.default_exit = record.exit.default;
        state.exit_reactions = exit;
    }
    Ok(())
}

fn resolve_reaction_list(
    record: &StateRecord,
    reaction: &ReactionRecord,
    kind: ReactionKind,
    triggers: &TriggerTable,
) -> Result<Vec<TriggerId>, ResolutionError> {
    reaction
        .triggers
        .iter()
        .map(|name| {
            triggers
                .lookup(name)
                .ok_or_else(|| ResolutionError::UnknownReactionTrigger {
                    state: record.name.clone(),
                    kind,
                    trigger: name.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass1_triggers::collect_triggers;
    use crate::records::TriggerRecord;

    fn no_triggers() -> TriggerTable {
        TriggerTable::default()
    }

    fn names(table: &StateTable, ids: &[StateId]) -> Vec<String> {
        ids.iter()
            .map(|id| table.states[id.0].name.clone())
            .collect()
    }

    #[test]
    fn children_may_precede_their_parent() {
        let table = collect_states(
            &[
                StateRecord::child("B", "A").initial(),
                StateRecord::child("C", "A"),
                StateRecord::root("A").initial(),
            ],
            &no_triggers(),
        )
        .unwrap();
        assert_eq!(names(&table, &table.roots), vec!["A"]);
        let a = table.lookup("A").unwrap();
        assert_eq!(names(&table, &table.states[a.0].children), vec!["B", "C"]);
        assert_eq!(table.states[table.lookup("B").unwrap().0].parent, Some(a));
    }

    #[test]
    fn duplicate_state_is_rejected() {
        let err = collect_states(
            &[StateRecord::root("A"), StateRecord::root("A")],
            &no_triggers(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::DuplicateState {
                name: "A".to_owned()
            }
        );
    }

    #[test]
    fn unexistent_parent_is_rejected() {
        let err = collect_states(&[StateRecord::child("B", "Nope")], &no_triggers()).unwrap_err();
        assert!(err.to_string().contains("unexistent parent"), "{}", err);
        assert_eq!(
            err,
            ResolutionError::UnexistentParent {
                state: "B".to_owned(),
                parent: "Nope".to_owned()
            }
        );
    }

    #[test]
    fn two_state_cycle_is_rejected() {
        let err = collect_states(
            &[StateRecord::child("A", "B"), StateRecord::child("B", "A")],
            &no_triggers(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::ParentCycle {
                state: "B".to_owned(),
                path: vec!["B".to_owned(), "A".to_owned(), "B".to_owned()],
            }
        );
        assert_eq!(
            err.to_string(),
            "collecting states: state hierarchy cycle detected: B \u{2192} A \u{2192} B"
        );
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let err = collect_states(&[StateRecord::child("A", "A")], &no_triggers()).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::ParentCycle {
                state: "A".to_owned(),
                path: vec!["A".to_owned(), "A".to_owned()],
            }
        );
    }

    #[test]
    fn longer_cycle_reports_full_path() {
        let err = collect_states(
            &[
                StateRecord::child("A", "C"),
                StateRecord::child("B", "A"),
                StateRecord::child("C", "B"),
            ],
            &no_triggers(),
        )
        .unwrap_err();
        match err {
            ResolutionError::ParentCycle { state, path } => {
                assert_eq!(state, "C");
                assert_eq!(path, vec!["C", "B", "A", "C"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn reactions_resolve_in_order() {
        let triggers = collect_triggers(&[
            TriggerRecord::new("T1", "bool b"),
            TriggerRecord::new("T2", "int n"),
        ])
        .unwrap();
        let table = collect_states(
            &[StateRecord::root("A")
                .initial()
                .on_enter(true, &["T2", "T1"])
                .on_exit(false, &["T1"])],
            &triggers,
        )
        .unwrap();
        let a = &table.states[0];
        assert!(a.default_enter);
        assert!(!a.default_exit);
        assert_eq!(a.enter_reactions, vec![TriggerId(1), TriggerId(0)]);
        assert_eq!(a.exit_reactions, vec![TriggerId(0)]);
    }

    #[test]
    fn unknown_reaction_trigger_names_state_and_kind() {
        let err = collect_states(
            &[StateRecord::root("A").on_exit(false, &["Ghost"])],
            &no_triggers(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "collecting states: state \"A\": collecting exit reactions: cannot find trigger \"Ghost\""
        );
    }
}
