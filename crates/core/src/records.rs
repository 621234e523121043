//! Flat, string-keyed input records produced by a format reader.
//!
//! Records reference each other only by name. The declaration index of a
//! record is its position in the owning list.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub name: String,
    /// Raw C-family argument list, e.g. `"const std::string& who, int n"`.
    #[serde(default)]
    pub arguments: String,
}

/// Enter or exit reactions of a state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub name: String,
    /// Empty = root state.
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub initial: bool,
    #[serde(default)]
    pub enter: ReactionRecord,
    #[serde(default)]
    pub exit: ReactionRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    /// Empty = null transition.
    #[serde(default)]
    pub trigger: String,
}

impl fmt::Display for TransitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition {}: {} > {}", self.trigger, self.from, self.to)
    }
}

/// Everything a format reader knows about one statechart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatechartRecords {
    pub name: String,
    #[serde(default)]
    pub triggers: Vec<TriggerRecord>,
    #[serde(default)]
    pub states: Vec<StateRecord>,
    #[serde(default)]
    pub transitions: Vec<TransitionRecord>,
}

// ── Builders ────────────────────────────────────────────────────────
//
// Terse constructors for embedders and tests that assemble records by hand.

impl TriggerRecord {
    pub fn new(name: &str, arguments: &str) -> Self {
        TriggerRecord {
            name: name.to_owned(),
            arguments: arguments.to_owned(),
        }
    }
}

impl StateRecord {
    pub fn root(name: &str) -> Self {
        StateRecord {
            name: name.to_owned(),
            ..StateRecord::default()
        }
    }

    pub fn child(name: &str, parent: &str) -> Self {
        StateRecord {
            name: name.to_owned(),
            parent: parent.to_owned(),
            ..StateRecord::default()
        }
    }

    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    pub fn on_enter(mut self, default: bool, triggers: &[&str]) -> Self {
        self.enter = ReactionRecord {
            default,
            triggers: triggers.iter().map(|t| (*t).to_owned()).collect(),
        };
        self
    }

    pub fn on_exit(mut self, default: bool, triggers: &[&str]) -> Self {
        self.exit = ReactionRecord {
            default,
            triggers: triggers.iter().map(|t| (*t).to_owned()).collect(),
        };
        self
    }
}

impl TransitionRecord {
    pub fn new(from: &str, to: &str, trigger: &str) -> Self {
        TransitionRecord {
            from: from.to_owned(),
            to: to.to_owned(),
            trigger: trigger.to_owned(),
        }
    }
}
