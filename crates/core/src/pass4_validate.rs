//! Pass 4: Structural validation -- every sibling group that needs an
//! entry point has exactly one initial state.

use crate::error::{Scope, ValidationError};
use crate::ir::{StateId, Statechart};
use tracing::debug;

pub fn validate(chart: &Statechart) -> Result<(), ValidationError> {
    if chart.roots.is_empty() {
        return Err(ValidationError::NoRoots);
    }
    validate_group(chart, Scope::Roots, &chart.roots)?;
    debug!(chart = %chart.name, "pass 4: validated");
    Ok(())
}

fn validate_group(chart: &Statechart, scope: Scope, group: &[StateId]) -> Result<(), ValidationError> {
    check_single_initial(chart, scope, group)?;
    for id in group {
        let state = chart.state(*id);
        if state.is_composite() {
            validate_group(
                chart,
                Scope::ChildrenOf(state.name.clone()),
                &state.children,
            )?;
        }
    }
    Ok(())
}

/// Stops at the second initial state found.
fn check_single_initial(
    chart: &Statechart,
    scope: Scope,
    group: &[StateId],
) -> Result<(), ValidationError> {
    let mut first: Option<&str> = None;
    for id in group {
        let state = chart.state(*id);
        if !state.initial {
            continue;
        }
        if let Some(first) = first {
            return Err(ValidationError::DuplicateInitial {
                scope,
                first: first.to_owned(),
                second: state.name.clone(),
            });
        }
        first = Some(&state.name);
    }
    match first {
        Some(_) => Ok(()),
        None => Err(ValidationError::NoInitial { scope }),
    }
}
