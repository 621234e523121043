//! Pass orchestration: records -> resolved, validated [`Statechart`].
//!
//! [`build`] runs the three resolver passes and returns either a complete
//! statechart or the first error; nothing partially built escapes.
//! [`elaborate`] adds the record source in front and validation behind.

use crate::error::{ChartError, CompileError, ResolutionError};
use crate::ir::Statechart;
use crate::pass1_triggers;
use crate::pass2_states;
use crate::pass3_transitions;
use crate::pass4_validate;
use crate::records::StatechartRecords;
use crate::source::{RecordSource, YamlSource};
use std::path::Path;
use tracing::debug;

/// Resolve flat records into a statechart. Fails fast.
pub fn build(records: &StatechartRecords) -> Result<Statechart, ResolutionError> {
    // Pass 1: triggers
    let triggers = pass1_triggers::collect_triggers(&records.triggers)?;

    // Pass 2: states, hierarchy, reactions
    let mut states = pass2_states::collect_states(&records.states, &triggers)?;

    // Pass 3: transitions
    pass3_transitions::collect_transitions(&records.transitions, &mut states, &triggers)?;

    Ok(Statechart {
        name: records.name.clone(),
        triggers: triggers.triggers,
        states: states.states,
        roots: states.roots,
        trigger_map: triggers.by_name,
        state_map: states.by_name,
    })
}

/// Produce records from `source`, build them and validate the result.
pub fn elaborate(source: &dyn RecordSource) -> Result<Statechart, CompileError> {
    let records = source.produce_records()?;
    debug!(chart = %records.name, "elaborating");
    let chart = build(&records)?;

    // Pass 4: validation
    pass4_validate::validate(&chart)?;
    Ok(chart)
}

/// [`elaborate`] a YAML file.
pub fn elaborate_path(path: &Path) -> Result<Statechart, CompileError> {
    let source = YamlSource::from_path(path)?;
    elaborate(&source)
}

/// Elaborate several `(name, source)` pairs, stopping at the first failure.
/// The name labels the error, since a source that cannot be read has no
/// chart name of its own.
pub fn elaborate_all<'a, I>(sources: I) -> Result<Vec<Statechart>, ChartError>
where
    I: IntoIterator<Item = (&'a str, &'a dyn RecordSource)>,
{
    let mut charts = Vec::new();
    for (name, source) in sources {
        let chart = elaborate(source).map_err(|error| ChartError {
            chart: name.to_owned(),
            error,
        })?;
        charts.push(chart);
    }
    Ok(charts)
}

/// Validate charts that were built elsewhere, naming the first failing one.
pub fn validate_statecharts(charts: &[Statechart]) -> Result<(), ChartError> {
    for chart in charts {
        pass4_validate::validate(chart).map_err(|e| ChartError {
            chart: chart.name.clone(),
            error: e.into(),
        })?;
    }
    Ok(())
}
