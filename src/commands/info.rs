use super::{PipelineError, Result};
use crate::analysis::compute_deltas;
use crate::formats::nyt::{presidential_race, read_race_page, CandidateKeys};
use crate::model::{DerivedBatch, StateTimeSeries};
use colored::*;
use itertools::Itertools;
use std::path::Path;

/// Validate a stored race page and print a summary of its presidential race.
pub fn info(path: &Path, keys: &CandidateKeys) -> Result<()> {
    let state = path.display().to_string();
    let format_error = |source| PipelineError::Format {
        state: state.clone(),
        source,
    };

    let page = read_race_page(path).map_err(format_error)?;
    let race = presidential_race(&page).map_err(format_error)?;

    println!("{}: {}", "State".bright_white().bold(), race.state_name.cyan());
    println!("{}: {}", "Races on page".bright_white().bold(), page.data.races.len());

    let candidates = race
        .timeseries
        .iter()
        .flat_map(|point| point.vote_shares.keys())
        .unique()
        .sorted()
        .join(", ");
    println!("{}: {}", "Share keys".bright_white().bold(), candidates);

    let series = StateTimeSeries::from_race(&race.state_slug, race, &keys.rep, &keys.dem);
    let batches = compute_deltas(series.records()).map_err(|source| PipelineError::Analysis {
        state: state.clone(),
        source,
    })?;

    println!("{}: {}", "Snapshots".bright_white().bold(), series.len());
    if let Some(last) = series.records().last() {
        println!(
            "{}: {} votes, {} {:.3} / {} {:.3}",
            "Final".bright_white().bold(),
            last.votes,
            keys.rep,
            last.share_rep,
            keys.dem,
            last.share_dem
        );
    }

    match mean_nonzero_ratio(&batches) {
        Some(mean) => println!(
            "{}: {:.4}",
            "Mean D/R ratio (non-zero batches)".bright_white().bold(),
            mean
        ),
        None => println!("{}", "No batches with a defined D/R ratio".yellow()),
    }

    Ok(())
}

fn mean_nonzero_ratio(batches: &[DerivedBatch]) -> Option<f64> {
    let ratios: Vec<f64> = batches
        .iter()
        .map(|b| b.dem_over_rep)
        .filter(|r| *r != 0.0)
        .collect();
    if ratios.is_empty() {
        None
    } else {
        Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
    }
}
