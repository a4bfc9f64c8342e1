//! Plot-ready serialisation and persistence of trend sets.
//!
//! Each trend is written as one JSON artifact made of scatter traces
//! (`x` dates, `y` values) that a charting front end can load directly.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::trends::utility::title_case;
use crate::trends::{BreakdownPoint, MonthlySummary, ScalarPoint, TrendSet};

/// CRS cut-off traces keyed by program stream.
pub const CRS_TREND_FILE: &str = "processed_data_crs_trend.json";
/// Candidate counts per CRS band, keyed `CRS Range: <band>`.
pub const POOL_TREND_FILE: &str = "processed_data_pool_trend.json";
/// Monthly `[Draw Invitations, Total(Mean) Candidates]` pair.
pub const DRAW_SIZE_FILE: &str = "processed_data_draw_size.json";
/// Rounds per program stream on each draw date.
pub const POOL_COMPOSITION_FILE: &str = "processed_data_pool_composition.json";
/// Invitations issued by each round.
pub const DRAW_SIZE_ROUNDS_FILE: &str = "processed_data_draw_size_rounds.json";

/// Every artifact [`write_artifacts`] produces, in write order.
pub const ARTIFACT_FILES: [&str; 5] = [
    CRS_TREND_FILE,
    POOL_TREND_FILE,
    DRAW_SIZE_FILE,
    POOL_COMPOSITION_FILE,
    DRAW_SIZE_ROUNDS_FILE,
];

/// One line series in the artifact format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotTrace<Y> {
    pub x: Vec<String>,
    pub y: Vec<Y>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
}

impl<Y> PlotTrace<Y> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            kind: "scatter",
            mode: "lines+markers",
            name: name.into(),
        }
    }

    fn push(&mut self, x: String, y: Y) {
        self.x.push(x);
        self.y.push(y);
    }
}

fn date_label(point: &ScalarPoint) -> String {
    point.date.format("%Y-%m-%d").to_string()
}

/// Groups scalar points into one trace per series, keyed by series name.
///
/// Trace names are title-cased like the labels shown on the published charts.
pub fn series_traces(points: &[ScalarPoint]) -> BTreeMap<String, PlotTrace<u32>> {
    let mut traces: BTreeMap<String, PlotTrace<u32>> = BTreeMap::new();
    for p in points {
        let key = p.series.clone().unwrap_or_default();
        traces
            .entry(key.clone())
            .or_insert_with(|| PlotTrace::new(title_case(&key)))
            .push(date_label(p), p.value);
    }
    traces
}

/// One trace per category holding that category's count on each draw date
/// it appears.
pub fn pool_traces(points: &[BreakdownPoint]) -> BTreeMap<String, PlotTrace<u32>> {
    let mut traces: BTreeMap<String, PlotTrace<u32>> = BTreeMap::new();
    for p in points {
        let x = p.date.format("%Y-%m-%d").to_string();
        for (category, count) in &p.value {
            traces
                .entry(category.clone())
                .or_insert_with(|| PlotTrace::new(title_case(category)))
                .push(x.clone(), *count);
        }
    }
    traces
}

/// A single `Draw Invitations` trace with one point per round.
pub fn draw_size_traces(points: &[ScalarPoint]) -> Vec<PlotTrace<u32>> {
    let mut trace = PlotTrace::new("Draw Invitations");
    for p in points {
        trace.push(date_label(p), p.value);
    }
    vec![trace]
}

/// Monthly invitation totals alongside the mean pool size.
pub fn monthly_traces(summary: &[MonthlySummary]) -> (PlotTrace<u64>, PlotTrace<f64>) {
    let mut invitations = PlotTrace::new("Draw Invitations");
    let mut candidates = PlotTrace::new("Total(Mean) Candidates");
    for m in summary {
        invitations.push(m.label(), m.invitations);
        candidates.push(m.label(), m.mean_candidates);
    }
    (invitations, candidates)
}

/// Serialises `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "Wrote artifact");
    Ok(())
}

/// Writes every artifact for `trends` into `dir` and returns their paths.
pub fn write_artifacts(dir: &Path, trends: &TrendSet) -> Result<Vec<PathBuf>> {
    let artifacts = [
        (CRS_TREND_FILE, serde_json::to_value(series_traces(&trends.crs_trend))?),
        (
            POOL_TREND_FILE,
            serde_json::to_value(series_traces(&trends.pool_distribution))?,
        ),
        (
            DRAW_SIZE_FILE,
            serde_json::to_value(monthly_traces(&trends.monthly_draw_summary))?,
        ),
        (
            POOL_COMPOSITION_FILE,
            serde_json::to_value(pool_traces(&trends.pool_trend))?,
        ),
        (
            DRAW_SIZE_ROUNDS_FILE,
            serde_json::to_value(draw_size_traces(&trends.draw_size_trend))?,
        ),
    ];

    let mut written = Vec::with_capacity(artifacts.len());
    for (name, body) in &artifacts {
        let path = dir.join(name);
        write_json(&path, body)?;
        written.push(path);
    }

    info!(dir = %dir.display(), count = written.len(), "Artifacts written");
    Ok(written)
}

/// Logs the full trend set as pretty-printed JSON.
pub fn print_json(trends: &TrendSet) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(trends)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::extract_all;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn sample_trends() -> TrendSet {
        let doc = json!({"rounds": [
            {"drawNumber": "2", "drawDate": "2023-01-18", "drawName": "Canadian Experience Class",
             "drawSize": "1,000", "drawCRS": "507", "dd1": "600", "dd18": "210,000"},
            {"drawNumber": "1", "drawDate": "2023-01-04", "drawName": "Provincial Nominee Program (PNP)",
             "drawSize": "3,500", "drawCRS": "481", "dd1": "512", "dd17": "6,104", "dd18": "200,000"}
        ]});
        extract_all(&doc).unwrap().trends
    }

    fn read(path: &Path) -> Value {
        serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
    }

    #[test]
    fn test_series_traces_keyed_by_category() {
        let traces = series_traces(&sample_trends().crs_trend);

        assert_eq!(traces.len(), 2);
        let pnp = &traces["Provincial Nominee Program"];
        assert_eq!(pnp.x, vec!["2023-01-04"]);
        assert_eq!(pnp.y, vec![481]);
        assert_eq!(pnp.name, "Provincial Nominee Program");
    }

    #[test]
    fn test_trace_serialises_type_field() {
        let trace: PlotTrace<u32> = PlotTrace::new("Draw Invitations");
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], "scatter");
        assert_eq!(value["mode"], "lines+markers");
    }

    #[test]
    fn test_write_artifacts_creates_all_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("out");

        let written = write_artifacts(&dir, &sample_trends()).unwrap();

        assert_eq!(written.len(), ARTIFACT_FILES.len());
        for name in ARTIFACT_FILES {
            assert!(dir.join(name).exists(), "missing {name}");
        }
    }

    #[test]
    fn test_draw_size_rounds_artifact_is_date_ordered() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), &sample_trends()).unwrap();

        let draw_size = read(&tmp.path().join(DRAW_SIZE_ROUNDS_FILE));
        assert_eq!(draw_size[0]["name"], "Draw Invitations");
        assert_eq!(draw_size[0]["x"], json!(["2023-01-04", "2023-01-18"]));
        assert_eq!(draw_size[0]["y"], json!([3500, 1000]));
    }

    #[test]
    fn test_draw_size_artifact_is_monthly_pair() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), &sample_trends()).unwrap();

        let monthly = read(&tmp.path().join(DRAW_SIZE_FILE));
        assert_eq!(monthly.as_array().unwrap().len(), 2);
        assert_eq!(monthly[0]["name"], "Draw Invitations");
        assert_eq!(monthly[0]["x"], json!(["2023-01"]));
        assert_eq!(monthly[1]["x"], json!(["2023-01"]));
        assert_eq!(monthly[0]["y"], json!([4500]));
        assert_eq!(monthly[1]["name"], "Total(Mean) Candidates");
        assert_eq!(monthly[1]["y"], json!([205000.0]));
    }

    #[test]
    fn test_pool_trend_artifact_keyed_by_crs_band() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), &sample_trends()).unwrap();

        let dist = read(&tmp.path().join(POOL_TREND_FILE));
        assert!(
            dist.as_object()
                .unwrap()
                .keys()
                .all(|k| k.starts_with("CRS Range: "))
        );
        let top = &dist["CRS Range: 601-1200"];
        assert_eq!(top["name"], "Crs Range: 601-1200");
        assert_eq!(top["y"], json!([512, 600]));
        assert_eq!(dist["CRS Range: 0-300"]["y"], json!([6104]));
    }

    #[test]
    fn test_pool_composition_artifact_keyed_by_category() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), &sample_trends()).unwrap();

        let composition = read(&tmp.path().join(POOL_COMPOSITION_FILE));
        let keys: Vec<_> = composition.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Canadian Experience Class", "Provincial Nominee Program"]);
        assert_eq!(
            composition["Canadian Experience Class"]["x"],
            json!(["2023-01-18"])
        );
        assert_eq!(composition["Canadian Experience Class"]["y"], json!([1]));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&TrendSet::default()).unwrap();
    }
}
