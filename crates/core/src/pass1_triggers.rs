//! Pass 1: Trigger collection -- index triggers by name and parse their
//! argument signatures.

use crate::error::ResolutionError;
use crate::ir::{Trigger, TriggerId};
use crate::records::TriggerRecord;
use crate::signature::parse_arguments;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Trigger table produced by Pass 1. `triggers[id.index()]` is the trigger
/// declared at that position.
#[derive(Debug, Default)]
pub struct TriggerTable {
    pub triggers: Vec<Trigger>,
    pub by_name: HashMap<String, TriggerId>,
}

impl TriggerTable {
    pub fn lookup(&self, name: &str) -> Option<TriggerId> {
        self.by_name.get(name).copied()
    }
}

pub fn collect_triggers(records: &[TriggerRecord]) -> Result<TriggerTable, ResolutionError> {
    let mut table = TriggerTable::default();

    for record in records {
        if table.by_name.contains_key(&record.name) {
            return Err(ResolutionError::DuplicateTrigger {
                name: record.name.clone(),
            });
        }

        let arguments =
            parse_arguments(&record.arguments).map_err(|error| {
                ResolutionError::TriggerSignature {
                    trigger: record.name.clone(),
                    error,
                }
            })?;
        trace!(trigger = %record.name, arguments = arguments.len(), "trigger");

        let id = TriggerId(table.triggers.len());
        table.by_name.insert(record.name.clone(), id);
        table.triggers.push(Trigger {
            name: record.name.clone(),
            arguments,
        });
    }

    debug!(triggers = table.triggers.len(), "pass 1: triggers collected");
    Ok(table)
}
