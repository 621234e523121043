//! The resolved statechart: an arena of states and triggers addressed by
//! index.
//!
//! Ownership runs one way only. The [`Statechart`] owns every [`State`] and
//! [`Trigger`]; parent links, children lists, reactions and transition
//! endpoints are ids into those arenas, never owning pointers. Ids are the
//! declaration index of the record the node was built from, so iterating
//! the arenas yields declaration order.

use crate::signature::TriggerArgument;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl TriggerId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub name: String,
    pub arguments: Vec<TriggerArgument>,
}

impl Trigger {
    /// `"type name"` for every argument, in order.
    pub fn argument_list(&self) -> Vec<String> {
        self.arguments.iter().map(ToString::to_string).collect()
    }

    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.name.as_str()).collect()
    }
}

/// A transition owned by its `from` state. `trigger == None` is a null
/// transition, taken without any trigger firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub trigger: Option<TriggerId>,
}

impl Transition {
    pub fn is_null(&self) -> bool {
        self.trigger.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub name: String,
    pub parent: Option<StateId>,
    pub children: Vec<StateId>,
    pub initial: bool,
    pub default_enter: bool,
    pub enter_reactions: Vec<TriggerId>,
    pub default_exit: bool,
    pub exit_reactions: Vec<TriggerId>,
    pub transitions: Vec<Transition>,
}

impl State {
    pub(crate) fn bare(name: &str, initial: bool) -> Self {
        State {
            name: name.to_owned(),
            parent: None,
            children: Vec::new(),
            initial,
            default_enter: false,
            enter_reactions: Vec::new(),
            default_exit: false,
            exit_reactions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_parent_of(&self, child: StateId) -> bool {
        self.children.contains(&child)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statechart {
    pub name: String,
    /// Triggers in declaration order; `TriggerId` indexes this list.
    pub triggers: Vec<Trigger>,
    /// States in declaration order; `StateId` indexes this list.
    pub states: Vec<State>,
    /// States without a parent, in declaration order.
    pub roots: Vec<StateId>,
    pub trigger_map: HashMap<String, TriggerId>,
    pub state_map: HashMap<String, StateId>,
}

impl Statechart {
    /// Panics if `id` does not belong to this statechart.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// Panics if `id` does not belong to this statechart.
    pub fn trigger(&self, id: TriggerId) -> &Trigger {
        &self.triggers[id.0]
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_map.get(name).copied()
    }

    pub fn trigger_id(&self, name: &str) -> Option<TriggerId> {
        self.trigger_map.get(name).copied()
    }

    pub fn state_by_name(&self, name: &str) -> Option<&State> {
        self.state_id(name).map(|id| self.state(id))
    }

    pub fn trigger_by_name(&self, name: &str) -> Option<&Trigger> {
        self.trigger_id(name).map(|id| self.trigger(id))
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(StateId)
    }

    /// Name of the parent of `id`, or `"None"` for a root.
    pub fn parent_name(&self, id: StateId) -> &str {
        match self.state(id).parent {
            Some(parent) => &self.state(parent).name,
            None => "None",
        }
    }

    /// The child marked initial, if any. On a validated statechart every
    /// composite state has exactly one.
    pub fn initial_child(&self, id: StateId) -> Option<StateId> {
        self.state(id)
            .children
            .iter()
            .copied()
            .find(|child| self.state(*child).initial)
    }

    pub fn initial_root(&self) -> Option<StateId> {
        self.roots
            .iter()
            .copied()
            .find(|root| self.state(*root).initial)
    }

    /// Parent chain of `id`, nearest first, not including `id` itself.
    pub fn ancestors(&self, id: StateId) -> Vec<StateId> {
        let mut chain = Vec::new();
        let mut cur = self.state(id).parent;
        while let Some(parent) = cur {
            chain.push(parent);
            cur = self.state(parent).parent;
        }
        chain
    }

    pub fn depth(&self, id: StateId) -> usize {
        self.ancestors(id).len()
    }

    /// Every transition of every state, grouped by source state in
    /// declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.states.iter().flat_map(|s| s.transitions.iter())
    }
}
