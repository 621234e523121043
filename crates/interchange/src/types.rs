//! Typed structs representing the statechart interchange JSON.
//!
//! References between constructs stay as names, exactly as they appear in
//! the bundle; [`InterchangeStatechart`] offers lookups to follow them.

use serde::{Deserialize, Serialize};

/// A trigger argument: C-family type text plus parameter name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArgumentSpec {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerConstruct {
    pub name: String,
    pub arguments: Vec<ArgumentSpec>,
}

impl TriggerConstruct {
    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSpec {
    pub from: String,
    pub to: String,
    /// `None` for a null transition.
    pub trigger: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConstruct {
    pub name: String,
    pub parent: Option<String>,
    pub initial: bool,
    pub children: Vec<String>,
    pub default_enter: bool,
    pub enter_reactions: Vec<String>,
    pub default_exit: bool,
    pub exit_reactions: Vec<String>,
    pub transitions: Vec<TransitionSpec>,
}

impl StateConstruct {
    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A whole statechart bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterchangeStatechart {
    pub name: String,
    /// Producer version (e.g. "1.0").
    pub chartc_version: String,
    pub roots: Vec<String>,
    pub triggers: Vec<TriggerConstruct>,
    /// In declaration order.
    pub states: Vec<StateConstruct>,
}

impl InterchangeStatechart {
    pub fn state(&self, name: &str) -> Option<&StateConstruct> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn trigger(&self, name: &str) -> Option<&TriggerConstruct> {
        self.triggers.iter().find(|t| t.name == name)
    }

    pub fn roots(&self) -> impl Iterator<Item = &StateConstruct> + '_ {
        self.roots.iter().filter_map(|name| self.state(name))
    }

    pub fn initial_root(&self) -> Option<&StateConstruct> {
        self.roots().find(|s| s.initial)
    }

    pub fn initial_child(&self, name: &str) -> Option<&StateConstruct> {
        self.state(name)?
            .children
            .iter()
            .filter_map(|child| self.state(child))
            .find(|s| s.initial)
    }

    /// Every transition, grouped by source state in declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionSpec> + '_ {
        self.states.iter().flat_map(|s| s.transitions.iter())
    }
}
