//! Error types for every stage of the pipeline.
//!
//! Lexing aggregates [`LexError`]s into a list; everything after it fails
//! fast with a single error. [`CompileError`] is the union handed to callers
//! that run the whole pipeline through [`crate::elaborate`].

use std::fmt;
use std::path::PathBuf;

// ── Lexing ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnsupportedRune(char),
    UnterminatedString,
    SingleSlash,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnsupportedRune(c) => write!(f, "unsupported rune {:?}", c),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::SingleSlash => write!(f, "single slash token found"),
        }
    }
}

/// A malformed token. `line` and `column` point at the first code point of
/// the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "column":  self.column,
            "line":    self.line,
            "message": self.kind.to_string(),
        })
    }
}

// ── Signatures ──────────────────────────────────────────────────────

/// A trigger argument list that does not fit the C-family heuristic.
/// Character indices count code points from the start of the raw string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("char {index}: invalid char {ch:?}")]
    InvalidChar { index: usize, ch: char },

    #[error("char {index}: closing unopening template")]
    UnopenedTemplate { index: usize },

    #[error("unterminated template")]
    UnterminatedTemplate,

    #[error("argument {argument:?}: argument requires at least 2 words: type name")]
    MissingName { argument: String },

    #[error("argument {argument:?}: unexpected character in argument name {ch:?}")]
    InvalidName { argument: String, ch: char },

    #[error("argument {name:?}: argument is defined twice")]
    DuplicateArgument { name: String },
}

// ── Resolution ──────────────────────────────────────────────────────

/// Which reaction list of a state a trigger name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Enter,
    Exit,
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactionKind::Enter => f.write_str("enter"),
            ReactionKind::Exit => f.write_str("exit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("collecting triggers: trigger {name:?} defined twice")]
    DuplicateTrigger { name: String },

    #[error("collecting triggers: parsing arguments for trigger {trigger:?}: {error}")]
    TriggerSignature {
        trigger: String,
        error: SignatureError,
    },

    #[error("collecting states: state {name:?} already exists")]
    DuplicateState { name: String },

    #[error("collecting states: state {state:?} has unexistent parent state {parent:?}")]
    UnexistentParent { state: String, parent: String },

    #[error("collecting states: state {parent:?} already has state {child:?} as child")]
    AlreadyChild { parent: String, child: String },

    #[error("collecting states: state hierarchy cycle detected: {}", .path.join(" \u{2192} "))]
    ParentCycle { state: String, path: Vec<String> },

    #[error("collecting states: state {state:?}: collecting {kind} reactions: cannot find trigger {trigger:?}")]
    UnknownReactionTrigger {
        state: String,
        kind: ReactionKind,
        trigger: String,
    },

    #[error("collecting transitions: creating transition {transition:?}: cannot find from state {state:?}")]
    UnknownFromState { transition: String, state: String },

    #[error("collecting transitions: creating transition {transition:?}: cannot find to state {state:?}")]
    UnknownToState { transition: String, state: String },

    #[error("collecting transitions: creating transition {transition:?}: cannot find trigger {trigger:?}")]
    UnknownTrigger { transition: String, trigger: String },
}

// ── Validation ──────────────────────────────────────────────────────

/// The sibling group an initial-state check ran over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Roots,
    ChildrenOf(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Roots => f.write_str("root states"),
            Scope::ChildrenOf(parent) => write!(f, "children of state {:?}", parent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no root states found")]
    NoRoots,

    #[error("{scope}: no initial state found")]
    NoInitial { scope: Scope },

    #[error("{scope}: state marked as initial when an initial state already exists ({second:?} after {first:?})")]
    DuplicateInitial {
        scope: Scope,
        first: String,
        second: String,
    },
}

// ── Record sources ──────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("reading {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("unmarshalling yaml from {origin}: {error}")]
    Yaml {
        origin: String,
        error: serde_yaml::Error,
    },
}

// ── Pipeline ────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Resolve(#[from] ResolutionError),

    #[error(transparent)]
    Validate(#[from] ValidationError),
}

impl CompileError {
    /// Short name of the stage that failed, as used in expected-error
    /// fixtures.
    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::Source(_) => "source",
            CompileError::Resolve(_) => "resolve",
            CompileError::Validate(_) => "validate",
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.to_string(),
            "stage":   self.stage(),
        })
    }
}

/// A [`CompileError`] tagged with the statechart it came from.
#[derive(Debug, thiserror::Error)]
#[error("validating statechart {chart:?}: {error}")]
pub struct ChartError {
    pub chart: String,
    pub error: CompileError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    /// Every message in the `source()` chain, outermost first.
    fn chain(err: &dyn Error) -> Vec<String> {
        let mut out = vec![err.to_string()];
        let mut cur = err.source();
        while let Some(e) = cur {
            out.push(e.to_string());
            cur = e.source();
        }
        out
    }

    #[test]
    fn wrapped_causes_are_reported_once() {
        let err = ChartError {
            chart: "Sig".to_owned(),
            error: CompileError::Resolve(ResolutionError::TriggerSignature {
                trigger: "Go".to_owned(),
                error: SignatureError::MissingName {
                    argument: String::new(),
                },
            }),
        };
        let report = chain(&err).join(": ");
        assert_eq!(
            report,
            "validating statechart \"Sig\": collecting triggers: parsing arguments for trigger \"Go\": argument \"\": argument requires at least 2 words: type name"
        );
        assert_eq!(report.matches("at least 2 words").count(), 1);
    }

    #[test]
    fn source_errors_carry_their_cause_in_the_message() {
        let err = SourceError::Io {
            path: PathBuf::from("missing.yaml"),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(chain(&err), vec!["reading missing.yaml: no such file"]);
    }
}
