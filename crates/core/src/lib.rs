//! chartc-core: statechart description compiler core library.
//!
//! Turns flat statechart records (triggers, states, transitions referencing
//! each other by name) into a resolved, validated [`Statechart`] and its
//! interchange JSON, and scans the textual description language into
//! tokens.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`scan()`] -- tokenize description text, collecting every lex error
//! - [`parse_arguments()`] -- split a C-family trigger argument list
//! - [`build()`] -- resolve records into a [`Statechart`] (Passes 1-3)
//! - [`validate()`] -- initial-state checks (Pass 4)
//! - [`serialize()`] -- interchange JSON (Pass 5)
//! - [`elaborate()`] -- source, build and validate in one call
//! - [`RecordSource`] -- the boundary to concrete input formats

/// Version written to the `"chartc_version"` field of interchange output.
pub const CHARTC_VERSION: &str = "1.0";

mod charclass;
pub mod elaborate;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod pass1_triggers;
pub mod pass2_states;
pub mod pass3_transitions;
pub mod pass4_validate;
pub mod pass5_serialize;
pub mod records;
pub mod signature;
pub mod source;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{
    ChartError, CompileError, LexError, LexErrorKind, ResolutionError, SignatureError,
    SourceError, ValidationError,
};
pub use ir::{State, StateId, Statechart, Transition, Trigger, TriggerId};
pub use lexer::{Scanned, Token, TokenKind};
pub use records::{ReactionRecord, StateRecord, StatechartRecords, TransitionRecord, TriggerRecord};
pub use signature::TriggerArgument;
pub use source::{InMemorySource, RecordSource, YamlSource};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use elaborate::{build, elaborate, elaborate_all, elaborate_path, validate_statecharts};
pub use lexer::scan;
pub use pass4_validate::validate;
pub use pass5_serialize::serialize;
pub use signature::parse_arguments;
