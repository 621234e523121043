//! Project file format for `chartc.toml`.
//!
//! ```toml
//! [project]
//! out_dir = "generated"
//!
//! [[statechart]]
//! path = "charts/door.yaml"
//! name = "Door"
//! ```

use std::path::{Path, PathBuf};

use chartc_core::source::resolve_relative;
use serde::Deserialize;

/// Top-level layout of the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default, rename = "statechart")]
    pub statecharts: Vec<ChartEntry>,
}

/// `[project]`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

impl Default for ProjectSection {
    fn default() -> Self {
        ProjectSection {
            out_dir: default_out_dir(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("generated")
}

/// `[[statechart]]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChartEntry {
    pub path: PathBuf,
    /// Replaces the `name` written in the YAML file.
    pub name: Option<String>,
}

impl ChartEntry {
    /// Label used in logs and errors before the chart itself is read.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.path.display().to_string(),
        }
    }
}

/// A loaded project with every path resolved against the config file.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub out_dir: PathBuf,
    pub statecharts: Vec<ChartEntry>,
}

/// Read and parse a project file.
pub fn read_config(path: &Path) -> Result<ProjectConfig, String> {
    let toml_str = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    parse_config(&toml_str, path)
}

/// Parse project TOML. `path` is where the text came from; relative paths
/// inside it are taken relative to its directory.
pub fn parse_config(toml_str: &str, path: &Path) -> Result<ProjectConfig, String> {
    let file: ConfigFile = toml::from_str(toml_str)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    if file.statecharts.is_empty() {
        return Err(format!("'{}': no statecharts listed", path.display()));
    }

    Ok(ProjectConfig {
        out_dir: resolve_relative(path, &file.project.out_dir),
        statecharts: file
            .statecharts
            .into_iter()
            .map(|entry| ChartEntry {
                path: resolve_relative(path, &entry.path),
                name: entry.name,
            })
            .collect(),
    })
}
