//! Deserialization from interchange JSON bundles into typed structs.
//!
//! The main entry point is [`from_interchange`], which takes a
//! `&serde_json::Value` and produces an [`InterchangeStatechart`]. Besides
//! shape checks it verifies that every name a construct references is
//! declared in the bundle.

use crate::types::*;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Errors during interchange JSON deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterchangeError {
    /// The bundle is missing a required top-level field.
    MissingField { field: String },
    /// A construct is malformed or references something undeclared.
    ConstructError {
        kind: String,
        name: String,
        message: String,
    },
    /// The bundle structure is invalid.
    InvalidBundle(String),
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::MissingField { field } => {
                write!(f, "bundle missing required field: '{}'", field)
            }
            InterchangeError::ConstructError {
                kind,
                name,
                message,
            } => {
                write!(f, "{} '{}': {}", kind, name, message)
            }
            InterchangeError::InvalidBundle(msg) => {
                write!(f, "invalid bundle: {}", msg)
            }
        }
    }
}

impl std::error::Error for InterchangeError {}

/// Deserialize an interchange JSON bundle into typed structs.
pub fn from_interchange(bundle: &Value) -> Result<InterchangeStatechart, InterchangeError> {
    let kind = bundle
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("kind"))?;
    if kind != "Statechart" {
        return Err(InterchangeError::InvalidBundle(format!(
            "expected kind 'Statechart', got '{}'",
            kind
        )));
    }

    let name = bundle
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("name"))?
        .to_string();

    let chartc_version = bundle
        .get("chartc_version")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let roots = string_list(bundle, "roots").ok_or_else(|| missing("roots"))?;

    let triggers = bundle
        .get("triggers")
        .and_then(|v| v.as_array())
        .ok_or_else(|| missing("triggers"))?
        .iter()
        .map(parse_trigger)
        .collect::<Result<Vec<_>, _>>()?;

    let states = bundle
        .get("states")
        .and_then(|v| v.as_array())
        .ok_or_else(|| missing("states"))?
        .iter()
        .map(parse_state)
        .collect::<Result<Vec<_>, _>>()?;

    let chart = InterchangeStatechart {
        name,
        chartc_version,
        roots,
        triggers,
        states,
    };
    check_references(&chart)?;
    Ok(chart)
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn missing(field: &str) -> InterchangeError {
    InterchangeError::MissingField {
        field: field.to_string(),
    }
}

fn required_str(obj: &Value, field: &str) -> Result<String, InterchangeError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| InterchangeError::InvalidBundle(format!("missing '{}' field", field)))
}

fn string_list(obj: &Value, field: &str) -> Option<Vec<String>> {
    obj.get(field)?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(|s| s.to_string()))
        .collect()
}

fn construct_error(kind: &str, name: &str, message: String) -> InterchangeError {
    InterchangeError::ConstructError {
        kind: kind.to_string(),
        name: name.to_string(),
        message,
    }
}

fn parse_trigger(obj: &Value) -> Result<TriggerConstruct, InterchangeError> {
    let name = required_str(obj, "name")?;
    let args = obj
        .get("arguments")
        .ok_or_else(|| construct_error("Trigger", &name, "missing 'arguments'".to_string()))?;
    let arguments: Vec<ArgumentSpec> = serde_json::from_value(args.clone()).map_err(|e| {
        construct_error("Trigger", &name, format!("invalid 'arguments': {}", e))
    })?;
    if arguments.is_empty() {
        return Err(construct_error(
            "Trigger",
            &name,
            "'arguments' must list at least one argument".to_string(),
        ));
    }
    Ok(TriggerConstruct { name, arguments })
}

fn parse_state(obj: &Value) -> Result<StateConstruct, InterchangeError> {
    let name = required_str(obj, "name")?;
    let list = |field: &str| {
        string_list(obj, field).ok_or_else(|| {
            construct_error(
                "State",
                &name,
                format!("'{}' must be a list of names", field),
            )
        })
    };
    let flag = |field: &str| obj.get(field).and_then(|v| v.as_bool()).unwrap_or(false);

    let parent = obj
        .get("parent")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let transitions = obj
        .get("transitions")
        .and_then(|v| v.as_array())
        .ok_or_else(|| construct_error("State", &name, "missing 'transitions' list".to_string()))?
        .iter()
        .map(|t| parse_transition(t, &name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StateConstruct {
        parent,
        initial: flag("initial"),
        children: list("children")?,
        default_enter: flag("default_enter"),
        enter_reactions: list("enter_reactions")?,
        default_exit: flag("default_exit"),
        exit_reactions: list("exit_reactions")?,
        transitions,
        name,
    })
}

fn parse_transition(obj: &Value, owner: &str) -> Result<TransitionSpec, InterchangeError> {
    let field = |f: &str| {
        obj.get(f)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                construct_error("State", owner, format!("transition missing '{}'", f))
            })
    };
    let from = field("from")?;
    let to = field("to")?;
    let trigger = obj
        .get("trigger")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    if from != owner {
        return Err(construct_error(
            "State",
            owner,
            format!("owns a transition from '{}'", from),
        ));
    }
    Ok(TransitionSpec { from, to, trigger })
}

/// Every referenced state and trigger name must be declared.
fn check_references(chart: &InterchangeStatechart) -> Result<(), InterchangeError> {
    let states: HashSet<&str> = chart.states.iter().map(|s| s.name.as_str()).collect();
    let triggers: HashSet<&str> = chart.triggers.iter().map(|t| t.name.as_str()).collect();

    for root in &chart.roots {
        if !states.contains(root.as_str()) {
            return Err(InterchangeError::InvalidBundle(format!(
                "root '{}' is not a declared state",
                root
            )));
        }
    }

    for s in &chart.states {
        let unknown_state = |what: &str, target: &str| {
            construct_error("State", &s.name, format!("unknown {} '{}'", what, target))
        };
        if let Some(p) = &s.parent {
            if !states.contains(p.as_str()) {
                return Err(unknown_state("parent", p));
            }
        }
        for child in &s.children {
            if !states.contains(child.as_str()) {
                return Err(unknown_state("child", child));
            }
        }
        for t in s.enter_reactions.iter().chain(&s.exit_reactions) {
            if !triggers.contains(t.as_str()) {
                return Err(unknown_state("reaction trigger", t));
            }
        }
        for tr in &s.transitions {
            if !states.contains(tr.to.as_str()) {
                return Err(unknown_state("transition target", &tr.to));
            }
            if let Some(t) = &tr.trigger {
                if !triggers.contains(t.as_str()) {
                    return Err(unknown_state("transition trigger", t));
                }
            }
        }
    }
    Ok(())
}
