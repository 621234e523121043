//! Record source abstraction for format-independent elaboration.
//!
//! The [`RecordSource`] trait is the boundary between a concrete input
//! format and the resolver: the core only ever sees [`StatechartRecords`].

use crate::error::SourceError;
use crate::records::StatechartRecords;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can produce the flat records of one statechart.
pub trait RecordSource {
    fn produce_records(&self) -> Result<StatechartRecords, SourceError>;
}

/// YAML-backed source. The document maps directly onto
/// [`StatechartRecords`]:
///
/// ```yaml
/// name: Door
/// triggers:
///   - { name: Open, arguments: "const std::string& who" }
/// states:
///   - { name: Closed, initial: true }
///   - { name: Opened, enter: { default: true, triggers: [Open] } }
/// transitions:
///   - { from: Closed, to: Opened, trigger: Open }
/// ```
pub struct YamlSource {
    text: String,
    origin: String,
}

impl YamlSource {
    /// Wrap YAML text. `origin` names the text in error messages.
    pub fn from_text(text: impl Into<String>, origin: impl Into<String>) -> Self {
        YamlSource {
            text: text.into(),
            origin: origin.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|error| SourceError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(YamlSource {
            text,
            origin: path.display().to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl RecordSource for YamlSource {
    fn produce_records(&self) -> Result<StatechartRecords, SourceError> {
        let records: StatechartRecords =
            serde_yaml::from_str(&self.text).map_err(|error| SourceError::Yaml {
                origin: self.origin.clone(),
                error,
            })?;
        debug!(
            origin = %self.origin,
            triggers = records.triggers.len(),
            states = records.states.len(),
            transitions = records.transitions.len(),
            "records loaded"
        );
        Ok(records)
    }
}

/// Source over records that are already in memory.
pub struct InMemorySource {
    records: StatechartRecords,
}

impl InMemorySource {
    pub fn new(records: StatechartRecords) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemorySource {
    fn produce_records(&self) -> Result<StatechartRecords, SourceError> {
        Ok(self.records.clone())
    }
}

/// Resolve a path relative to the directory of `base` unless it is
/// already absolute.
pub fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    base.parent()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}
