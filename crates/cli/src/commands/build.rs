use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::process;

use chartc_core::{RecordSource, SourceError, Statechart, StatechartRecords, YamlSource};
use tracing::info;

use crate::config::{read_config, ChartEntry};
use crate::{report_error, OutputFormat};

/// A YAML source whose chart name may be overridden by the project file.
struct ConfiguredSource {
    yaml: YamlSource,
    name: Option<String>,
}

impl ConfiguredSource {
    fn open(entry: &ChartEntry) -> Result<Self, SourceError> {
        Ok(ConfiguredSource {
            yaml: YamlSource::from_path(&entry.path)?,
            name: entry.name.clone(),
        })
    }
}

impl RecordSource for ConfiguredSource {
    fn produce_records(&self) -> Result<StatechartRecords, SourceError> {
        let mut records = self.yaml.produce_records()?;
        if let Some(name) = &self.name {
            records.name = name.clone();
        }
        Ok(records)
    }
}

/// `<out_dir>/<name>.json` for every chart. Each name must be a single
/// file name component and no two charts may share one.
fn bundle_paths(
    out_dir: &Path,
    charts: &[Statechart],
    labels: &[String],
) -> Result<Vec<PathBuf>, String> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut paths = Vec::with_capacity(charts.len());
    for (chart, label) in charts.iter().zip(labels) {
        let name = chart.name.as_str();
        let mut components = Path::new(name).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(c)), None) if c == name
        );
        if !single {
            return Err(format!(
                "statechart {:?}: name {:?} cannot be used as an output file name",
                label, name
            ));
        }
        if let Some(first) = seen.insert(name, label.as_str()) {
            return Err(format!(
                "statecharts {:?} and {:?} are both named {:?}",
                first, label, name
            ));
        }
        paths.push(out_dir.join(format!("{}.json", name)));
    }
    Ok(paths)
}

pub(crate) fn cmd_build(config_path: &Path, output: OutputFormat, quiet: bool) {
    let config = match read_config(config_path) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut labels = Vec::with_capacity(config.statecharts.len());
    let mut sources = Vec::with_capacity(config.statecharts.len());
    for entry in &config.statecharts {
        match ConfiguredSource::open(entry) {
            Ok(source) => {
                labels.push(entry.label());
                sources.push(source);
            }
            Err(e) => {
                let msg = format!("statechart {:?}: {}", entry.label(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }
    }

    let charts = match chartc_core::elaborate_all(
        labels
            .iter()
            .map(String::as_str)
            .zip(sources.iter().map(|s| s as &dyn RecordSource)),
    ) {
        Ok(charts) => charts,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    let paths = match bundle_paths(&config.out_dir, &charts, &labels) {
        Ok(paths) => paths,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&config.out_dir) {
        let msg = format!(
            "could not create output directory '{}': {}",
            config.out_dir.display(),
            e
        );
        report_error(&msg, output, quiet);
        process::exit(1);
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(charts.len());
    for (chart, path) in charts.iter().zip(paths) {
        let bundle = chartc_core::serialize(chart);
        let pretty = serde_json::to_string_pretty(&bundle)
            .unwrap_or_else(|e| format!("serialization error: {}", e));
        if let Err(e) = std::fs::write(&path, pretty + "\n") {
            let msg = format!("could not write '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        info!(chart = %chart.name, path = %path.display(), "wrote bundle");
        written.push(path);
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => {
            for path in &written {
                println!("wrote {}", path.display());
            }
        }
        OutputFormat::Json => {
            let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "written": paths }))
                    .unwrap_or_default()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartc_core::{InMemorySource, StateRecord};

    fn chart(name: &str) -> Statechart {
        let records = StatechartRecords {
            name: name.to_owned(),
            states: vec![StateRecord::root("A").initial()],
            ..StatechartRecords::default()
        };
        chartc_core::elaborate(&InMemorySource::new(records)).unwrap()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn paths_follow_chart_names() {
        let got = bundle_paths(
            Path::new("out"),
            &[chart("Door"), chart("Player")],
            &labels(&["door.yaml", "player.yaml"]),
        )
        .unwrap();
        assert_eq!(
            got,
            vec![PathBuf::from("out/Door.json"), PathBuf::from("out/Player.json")]
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = bundle_paths(
            Path::new("out"),
            &[chart("Door"), chart("Door")],
            &labels(&["a.yaml", "b.yaml"]),
        )
        .unwrap_err();
        assert_eq!(err, "statecharts \"a.yaml\" and \"b.yaml\" are both named \"Door\"");
    }

    #[test]
    fn names_must_be_a_single_file_name() {
        for name in ["", ".", "..", "../Door", "sub/Door", "/Door"] {
            let err = bundle_paths(Path::new("out"), &[chart(name)], &labels(&["x.yaml"]))
                .unwrap_err();
            assert!(err.contains("cannot be used as an output file name"), "{}: {}", name, err);
        }
    }
}
