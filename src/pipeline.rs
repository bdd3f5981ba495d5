use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::catalog::{Action, ActionCatalog, Catalogs};
use crate::chart::description::describe;
use crate::chart::render::ChartRenderer;
use crate::data::filter::select_action;
use crate::data::loader::load_dir;
use crate::data::model::Series;
use crate::output::{ensure_output_dir, write_chart};

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Input and output directories of one platform.
#[derive(Debug, Clone)]
pub struct Paths {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Paths {
    /// `root/json/<platform>` in, `root/graph/<platform>` out.
    pub fn for_platform(root: &Path, platform: &str) -> Self {
        Paths {
            input_dir: root.join("json").join(platform),
            output_dir: root.join("graph").join(platform),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-action report
// ---------------------------------------------------------------------------

/// What happened to one action's chart.
#[derive(Debug)]
pub struct ActionOutcome {
    pub action: String,
    /// Absolute path of the written image.
    pub result: Result<PathBuf>,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<ActionOutcome>,
}

impl RunReport {
    pub fn written(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(path) => Some((o.action.as_str(), path.as_path())),
            Err(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &anyhow::Error)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(_) => None,
            Err(err) => Some((o.action.as_str(), err)),
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Load every result file of a platform and write one chart per known action.
///
/// Loading problems and an unusable output directory abort the run. After
/// that each action succeeds or fails on its own and ends up in the report.
pub fn run(paths: &Paths, catalogs: &Catalogs, renderer: &dyn ChartRenderer) -> Result<RunReport> {
    let series = load_dir(&paths.input_dir, &catalogs.languages)
        .with_context(|| format!("loading results from {}", paths.input_dir.display()))?;
    info!(
        "loaded {} result files from {}, charting {} actions",
        series.len(),
        paths.input_dir.display(),
        catalogs.actions.len()
    );
    log_unused_and_duplicates(&series, &catalogs.actions);

    ensure_output_dir(&paths.output_dir)?;

    let mut report = RunReport::default();
    for action in catalogs.actions.iter() {
        let result = chart_action(&series, action, catalogs, renderer, &paths.output_dir);
        if let Err(err) = &result {
            error!("{}: {err:#}", action.id);
        }
        report.outcomes.push(ActionOutcome {
            action: action.id.clone(),
            result,
        });
    }
    Ok(report)
}

fn chart_action(
    series: &[Series],
    action: &Action,
    catalogs: &Catalogs,
    renderer: &dyn ChartRenderer,
    output_dir: &Path,
) -> Result<PathBuf> {
    let group = select_action(series, &action.id, &catalogs.languages);
    let chart = describe(&action.title, &group)?;
    if chart.is_empty() {
        warn!("{}: no results, writing a blank chart", action.id);
    }

    let image = renderer
        .render(&chart)
        .with_context(|| format!("rendering {}", action.id))?;
    write_chart(output_dir, &action.id, &image)
}

fn log_unused_and_duplicates(series: &[Series], actions: &ActionCatalog) {
    let mut seen: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for s in series {
        *seen.entry((s.action.as_str(), s.language.as_str())).or_default() += 1;
    }

    for ((action, language), count) in seen {
        if !actions.iter().any(|a| a.id == action) {
            debug!("{action}-{language}: action has no chart, ignored");
        } else if count > 1 {
            warn!("{action}-{language}: {count} result files, each is plotted");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::bail;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::description::ChartDescription;
    use crate::chart::render::PngRenderer;

    /// Renders through `PngRenderer` and keeps every description it was given.
    #[derive(Default)]
    struct Recording {
        inner: PngRenderer,
        charts: RefCell<Vec<ChartDescription>>,
    }

    impl ChartRenderer for Recording {
        fn render(&self, chart: &ChartDescription) -> Result<Vec<u8>> {
            self.charts.borrow_mut().push(chart.clone());
            self.inner.render(chart)
        }
    }

    /// Fails for one chart title, renders the rest.
    struct FailingOn(&'static str);

    impl ChartRenderer for FailingOn {
        fn render(&self, chart: &ChartDescription) -> Result<Vec<u8>> {
            if chart.title == self.0 {
                bail!("backend refused {}", chart.title);
            }
            PngRenderer::default().render(chart)
        }
    }

    fn results(points: &[(f64, f64)]) -> String {
        let entries: Vec<serde_json::Value> = points
            .iter()
            .map(|&(size, mean)| serde_json::json!({ "parameters": { "SIZE": size }, "mean": mean }))
            .collect();
        serde_json::json!({ "results": entries }).to_string()
    }

    fn platform(files: &[(&str, String)]) -> (tempfile::TempDir, Paths) {
        let root = tempfile::tempdir().unwrap();
        let paths = Paths::for_platform(root.path(), "linux");
        std::fs::create_dir_all(&paths.input_dir).unwrap();
        for (name, body) in files {
            std::fs::write(paths.input_dir.join(name), body).unwrap();
        }
        (root, paths)
    }

    #[test]
    fn paths_follow_platform() {
        let paths = Paths::for_platform(Path::new("result"), "m1");
        assert_eq!(paths.input_dir, Path::new("result/json/m1"));
        assert_eq!(paths.output_dir, Path::new("result/graph/m1"));
    }

    #[test]
    fn bubble_chart_end_to_end() {
        let (_root, paths) = platform(&[
            ("bubble-nt.json", results(&[(10.0, 0.005), (20.0, 0.015)])),
            ("bubble-hs.json", results(&[(10.0, 0.01), (20.0, 0.02)])),
        ]);
        let catalogs = Catalogs::builtin().unwrap();
        let renderer = Recording::default();

        let report = run(&paths, &catalogs, &renderer).unwrap();
        assert!(report.is_success());

        let bubble = paths.output_dir.join("bubble.png");
        assert!(std::fs::metadata(&bubble).unwrap().len() > 0);

        let charts = renderer.charts.borrow();
        let chart = charts.iter().find(|c| c.title == "Bubble Sort").unwrap();
        let labels: Vec<&str> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Haskell", "Neut"]);
        assert_eq!(chart.labels, vec![10.0, 20.0]);
        assert_eq!(chart.datasets[1].data, vec![0.005, 0.015]);
    }

    #[test]
    fn every_known_action_gets_a_chart() {
        let (_root, paths) = platform(&[("bubble-hs.json", results(&[(10.0, 0.01)]))]);
        let catalogs = Catalogs::builtin().unwrap();
        let renderer = Recording::default();

        let report = run(&paths, &catalogs, &renderer).unwrap();
        let written: Vec<&str> = report.written().map(|(action, _)| action).collect();
        assert_eq!(written, vec!["bubble", "dictionary", "intmap"]);

        let charts = renderer.charts.borrow();
        assert!(charts[1].is_empty());
        assert!(charts[2].labels.is_empty());
    }

    #[test]
    fn unknown_action_produces_no_output() {
        let (_root, paths) = platform(&[
            ("sort-hs.json", results(&[(10.0, 0.01)])),
            ("bubble-hs.json", results(&[(10.0, 0.01)])),
        ]);
        let catalogs = Catalogs::builtin().unwrap();
        let renderer = Recording::default();

        run(&paths, &catalogs, &renderer).unwrap();
        assert!(!paths.output_dir.join("sort.png").exists());
        let titles: Vec<String> = renderer
            .charts
            .borrow()
            .iter()
            .map(|c| c.title.clone())
            .collect();
        assert_eq!(
            titles,
            vec!["Bubble Sort", "Map (Create & Lookup)", "IntMap (Create & Lookup)"]
        );
    }

    #[test]
    fn one_failing_action_does_not_stop_the_rest() {
        let (_root, paths) = platform(&[
            ("bubble-hs.json", results(&[(10.0, 0.01)])),
            ("intmap-hs.json", results(&[(10.0, 0.01), (20.0, 0.03)])),
            ("intmap-nt.json", results(&[(10.0, 0.01), (40.0, 0.02)])),
        ]);
        let catalogs = Catalogs::builtin().unwrap();

        let report = run(&paths, &catalogs, &FailingOn("Bubble Sort")).unwrap();
        assert!(!report.is_success());

        let failed: Vec<&str> = report.failures().map(|(action, _)| action).collect();
        assert_eq!(failed, vec!["bubble", "intmap"]);
        let written: Vec<&str> = report.written().map(|(action, _)| action).collect();
        assert_eq!(written, vec!["dictionary"]);
        assert!(paths.output_dir.join("dictionary.png").exists());
        assert!(!paths.output_dir.join("bubble.png").exists());
    }

    #[test]
    fn load_errors_abort_the_run() {
        let (_root, paths) = platform(&[("bubble-hs.json", "{ not json".to_string())]);
        let catalogs = Catalogs::builtin().unwrap();

        let err = run(&paths, &catalogs, &PngRenderer::default()).unwrap_err();
        assert!(format!("{err:#}").contains("bubble-hs.json"));
        assert!(!paths.output_dir.exists());
    }
}
