//! Pass 5: Interchange JSON serialization.
//!
//! States and triggers are emitted in declaration order; every reference is
//! written as the referenced name. Object keys come out sorted because
//! `serde_json::Map` is a `BTreeMap` without the `preserve_order` feature.

use crate::ir::{State, StateId, Statechart, Transition, TriggerId};
use serde_json::{json, Map, Value};

pub fn serialize(chart: &Statechart) -> Value {
    let mut bundle = Map::new();
    bundle.insert("kind".to_owned(), json!("Statechart"));
    bundle.insert("chartc_version".to_owned(), json!(crate::CHARTC_VERSION));
    bundle.insert("name".to_owned(), json!(chart.name));
    bundle.insert(
        "roots".to_owned(),
        Value::Array(
            chart
                .roots
                .iter()
                .map(|id| json!(chart.state(*id).name))
                .collect(),
        ),
    );
    bundle.insert(
        "triggers".to_owned(),
        Value::Array(
            chart
                .triggers
                .iter()
                .map(|t| json!({ "name": t.name, "arguments": t.arguments }))
                .collect(),
        ),
    );
    bundle.insert(
        "states".to_owned(),
        Value::Array(
            chart
                .states
                .iter()
                .map(|s| serialize_state(chart, s))
                .collect(),
        ),
    );
    Value::Object(bundle)
}

fn serialize_state(chart: &Statechart, state: &State) -> Value {
    let mut m = Map::new();
    m.insert("name".to_owned(), json!(state.name));
    m.insert(
        "parent".to_owned(),
        match state.parent {
            Some(p) => json!(chart.state(p).name),
            None => Value::Null,
        },
    );
    m.insert("initial".to_owned(), json!(state.initial));
    m.insert("children".to_owned(), json!(state_names(chart, &state.children)));
    m.insert("default_enter".to_owned(), json!(state.default_enter));
    m.insert(
        "enter_reactions".to_owned(),
        json!(trigger_names(chart, &state.enter_reactions)),
    );
    m.insert("default_exit".to_owned(), json!(state.default_exit));
    m.insert(
        "exit_reactions".to_owned(),
        json!(trigger_names(chart, &state.exit_reactions)),
    );
    m.insert(
        "transitions".to_owned(),
        Value::Array(
            state
                .transitions
                .iter()
                .map(|t| serialize_transition(chart, t))
                .collect(),
        ),
    );
    Value::Object(m)
}

fn state_names<'a>(chart: &'a Statechart, ids: &[StateId]) -> Vec<&'a str> {
    ids.iter().map(|id| chart.state(*id).name.as_str()).collect()
}

fn trigger_names<'a>(chart: &'a Statechart, ids: &[TriggerId]) -> Vec<&'a str> {
    ids.iter().map(|id| chart.trigger(*id).name.as_str()).collect()
}

fn serialize_transition(chart: &Statechart, t: &Transition) -> Value {
    json!({
        "from": chart.state(t.from).name,
        "to": chart.state(t.to).name,
        "trigger": t.trigger.map(|id| chart.trigger(id).name.as_str()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elaborate::build;
    use crate::records::{StateRecord, StatechartRecords, TransitionRecord, TriggerRecord};

    #[test]
    fn serializes_names_in_declaration_order() {
        let chart = build(&StatechartRecords {
            name: "Door".to_owned(),
            triggers: vec![
                TriggerRecord::new("Open", "const std::string& who"),
                TriggerRecord::new("Close", "bool slam"),
            ],
            states: vec![
                StateRecord::root("Closed").initial().on_exit(true, &["Close"]),
                StateRecord::root("Opened").on_enter(false, &["Open"]),
            ],
            transitions: vec![
                TransitionRecord::new("Closed", "Opened", "Open"),
                TransitionRecord::new("Opened", "Closed", ""),
            ],
        })
        .unwrap();

        let got = serialize(&chart);
        let want = json!({
            "kind": "Statechart",
            "chartc_version": "1.0",
            "name": "Door",
            "roots": ["Closed", "Opened"],
            "triggers": [
                {"name": "Open", "arguments": [{"type": "const std::string&", "name": "who"}]},
                {"name": "Close", "arguments": [{"type": "bool", "name": "slam"}]}
            ],
            "states": [
                {
                    "name": "Closed", "parent": null, "initial": true, "children": [],
                    "default_enter": false, "enter_reactions": [],
                    "default_exit": true, "exit_reactions": ["Close"],
                    "transitions": [{"from": "Closed", "to": "Opened", "trigger": "Open"}]
                },
                {
                    "name": "Opened", "parent": null, "initial": false, "children": [],
                    "default_enter": false, "enter_reactions": ["Open"],
                    "default_exit": false, "exit_reactions": [],
                    "transitions": [{"from": "Opened", "to": "Closed", "trigger": null}]
                }
            ]
        });
        assert_eq!(got, want);
    }

    #[test]
    fn nested_states_name_their_parent() {
        let chart = build(&StatechartRecords {
            name: "N".to_owned(),
            states: vec![
                StateRecord::child("B", "A").initial(),
                StateRecord::root("A").initial(),
            ],
            ..StatechartRecords::default()
        })
        .unwrap();
        let got = serialize(&chart);
        assert_eq!(got["roots"], json!(["A"]));
        assert_eq!(got["states"][0]["name"], json!("B"));
        assert_eq!(got["states"][0]["parent"], json!("A"));
        assert_eq!(got["states"][1]["children"], json!(["B"]));
    }
}
