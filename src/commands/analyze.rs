use super::{download, PipelineError, Result};
use crate::analysis::{analyze_state, MonotonicPolicy, ResultTable, StateAnalysis};
use crate::config::PipelineConfig;
use crate::download::data_file_path;
use crate::export::{save_ratio_plot, write_table, ExportError};
use crate::formats::nyt::{nyt_timeseries_reader, CandidateKeys};
use crate::metrics::{MetricsCollector, PipelineStage};
use crate::model::StateTimeSeries;
use colored::*;
use std::fs;
use std::path::Path;

/// Download (optionally), load, compute, and export every configured state.
pub async fn analyze(config: &PipelineConfig) -> Result<ResultTable> {
    let mut metrics = MetricsCollector::new();
    metrics.start_stage("total");

    if config.download {
        metrics.start_stage("download");
        download(&config.data_dir, &config.states, &config.url_template).await?;
        metrics.end_stage(
            "download",
            PipelineStage::Download,
            None,
            Some(config.states.len() as u64),
        );
    }

    let series = load_states(
        &config.data_dir,
        &config.states,
        &config.candidate_keys,
        &mut metrics,
    )?;
    let analyses = run_pipeline(series, config.policy, &mut metrics)?;

    metrics.start_stage("csv");
    let table = ResultTable::from_states(&analyses);
    write_table(&table, &config.output_csv)?;
    metrics.end_stage(
        "csv",
        PipelineStage::CsvExport,
        None,
        Some(table.len() as u64),
    );
    println!(
        "✅ Wrote {} rows to {}",
        table.len().to_string().green(),
        config.output_csv.display().to_string().green()
    );

    if config.plots {
        create_plot_dir(&config.plot_dir)?;
        for analysis in &analyses {
            let key = format!("plot_{}", analysis.slug());
            metrics.start_stage(&key);
            let path = config.plot_dir.join(format!("{}.svg", analysis.slug()));
            save_ratio_plot(&path, analysis.slug(), &analysis.ratios())?;
            metrics.end_stage(
                &key,
                PipelineStage::Plotting,
                Some(analysis.slug()),
                Some(analysis.batches.len() as u64),
            );
        }
        println!(
            "🖼️  Saved {} plots to {}",
            analyses.len().to_string().green(),
            config.plot_dir.display()
        );
    }

    metrics.end_stage(
        "total",
        PipelineStage::Complete,
        None,
        Some(table.len() as u64),
    );
    metrics.print_summary();

    Ok(table)
}

fn create_plot_dir(plot_dir: &Path) -> Result<()> {
    fs::create_dir_all(plot_dir).map_err(|source| ExportError::Io {
        path: plot_dir.display().to_string(),
        source,
    })?;
    Ok(())
}

/// Read each state's stored race page, in the given order.
pub fn load_states(
    data_dir: &Path,
    states: &[String],
    keys: &CandidateKeys,
    metrics: &mut MetricsCollector,
) -> Result<Vec<StateTimeSeries>> {
    let mut loaded = Vec::with_capacity(states.len());

    for slug in states {
        println!("📂 Loading {}", slug.cyan());
        let key = format!("load_{}", slug);
        metrics.start_stage(&key);

        let path = data_file_path(data_dir, slug);
        let series = nyt_timeseries_reader(&path, slug, keys).map_err(|source| {
            PipelineError::Format {
                state: slug.clone(),
                source,
            }
        })?;

        metrics.end_stage(
            &key,
            PipelineStage::Loading,
            Some(slug),
            Some(series.len() as u64),
        );
        loaded.push(series);
    }

    Ok(loaded)
}

/// Compute batch deltas for every state independently.
pub fn run_pipeline(
    series: Vec<StateTimeSeries>,
    policy: MonotonicPolicy,
    metrics: &mut MetricsCollector,
) -> Result<Vec<StateAnalysis>> {
    series
        .into_iter()
        .map(|state_series| {
            let slug = state_series.slug.clone();
            let key = format!("calc_{}", slug);
            metrics.start_stage(&key);

            let analysis = analyze_state(state_series, policy).map_err(|source| {
                PipelineError::Analysis {
                    state: slug.clone(),
                    source,
                }
            })?;

            println!(
                "  📊 {}: {} batches",
                slug,
                analysis.batches.len().to_string().bright_yellow()
            );
            metrics.end_stage(
                &key,
                PipelineStage::Calculation,
                Some(&slug),
                Some(analysis.batches.len() as u64),
            );
            Ok(analysis)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisError;
    use crate::export::write_table_to;
    use tempfile::tempdir;

    fn page(state_name: &str, points: &[(u64, f64, f64)]) -> String {
        let timeseries = points
            .iter()
            .enumerate()
            .map(|(i, (votes, rep, dem))| {
                serde_json::json!({
                    "votes": votes,
                    "eevp": i,
                    "eevp_source": "edison",
                    "timestamp": format!("2020-11-04T0{}:00:00Z", i),
                    "vote_shares": {"trumpd": rep, "bidenj": dem}
                })
            })
            .collect::<Vec<_>>();

        serde_json::json!({
            "data": {"races": [{"state_name": state_name, "timeseries": timeseries}]}
        })
        .to_string()
    }

    #[test]
    fn loads_and_analyzes_states_in_order() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::write(
            data_file_path(dir, "ohio"),
            page("Ohio", &[(100, 0.5, 0.4), (150, 0.52, 0.38)]),
        )
        .unwrap();
        fs::write(
            data_file_path(dir, "new-york"),
            page("New York", &[(10, 0.4, 0.6), (10, 0.41, 0.59), (30, 0.35, 0.6)]),
        )
        .unwrap();

        let states = vec!["new-york".to_string(), "ohio".to_string()];
        let mut metrics = MetricsCollector::new();
        let series = load_states(dir, &states, &CandidateKeys::default(), &mut metrics).unwrap();
        let analyses = run_pipeline(series, MonotonicPolicy::Permissive, &mut metrics).unwrap();

        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].slug(), "new-york");
        assert_eq!(analyses[0].batches[1].dem_over_rep, 0.0);

        let table = ResultTable::from_states(&analyses);
        assert_eq!(table.len(), 5);
        assert_eq!(table.rows()[3].state, "Ohio");
        assert!((table.rows()[4].dem_over_rep - 0.34 / 0.56).abs() < 1e-6);

        let mut out = Vec::new();
        write_table_to(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 6);

        assert_eq!(metrics.recorded().len(), 4);
    }

    #[test]
    fn missing_data_file_names_the_state() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        let states = vec!["vermont".to_string()];
        let result = load_states(dir, &states, &CandidateKeys::default(), &mut MetricsCollector::new());

        match result {
            Err(PipelineError::Format { state, .. }) => assert_eq!(state, "vermont"),
            other => panic!("expected a format error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn empty_timeseries_fails_analysis() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::write(data_file_path(dir, "idaho"), page("Idaho", &[])).unwrap();

        let mut metrics = MetricsCollector::new();
        let series = load_states(
            dir,
            &["idaho".to_string()],
            &CandidateKeys::default(),
            &mut metrics,
        )
        .unwrap();
        let result = run_pipeline(series, MonotonicPolicy::Permissive, &mut metrics);

        assert!(matches!(
            result,
            Err(PipelineError::Analysis {
                source: AnalysisError::EmptyInput,
                ..
            })
        ));
    }

    #[test]
    fn strict_policy_surfaces_vote_decreases() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::write(
            data_file_path(dir, "iowa"),
            page("Iowa", &[(100, 0.5, 0.4), (90, 0.5, 0.4)]),
        )
        .unwrap();

        let mut metrics = MetricsCollector::new();
        let series = load_states(
            dir,
            &["iowa".to_string()],
            &CandidateKeys::default(),
            &mut metrics,
        )
        .unwrap();

        assert!(matches!(
            run_pipeline(series.clone(), MonotonicPolicy::Strict, &mut metrics),
            Err(PipelineError::Analysis {
                source: AnalysisError::NonMonotonicInput { index: 1, .. },
                ..
            })
        ));
        let permissive = run_pipeline(series, MonotonicPolicy::Permissive, &mut metrics).unwrap();
        assert_eq!(permissive[0].batches[1].delta_votes, -10);
    }

    #[test]
    fn plot_dir_failure_names_the_directory() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("plots");
        fs::write(&blocker, "not a directory").unwrap();
        let plot_dir = blocker.join("svg");

        match create_plot_dir(&plot_dir) {
            Err(PipelineError::Export(ExportError::Io { path, .. })) => {
                assert_eq!(path, plot_dir.display().to_string())
            }
            other => panic!("expected an export I/O error, got {:?}", other),
        }
        assert!(create_plot_dir(&tmp.path().join("fresh")).is_ok());
    }
}
