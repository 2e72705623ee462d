use super::{compute_deltas_with, AnalysisResult, MonotonicPolicy};
use crate::model::{DerivedBatch, StateTimeSeries};
use serde::Serialize;

/// One state's snapshots together with the batches derived from them.
#[derive(Debug, Clone)]
pub struct StateAnalysis {
    pub series: StateTimeSeries,
    pub batches: Vec<DerivedBatch>,
}

impl StateAnalysis {
    pub fn slug(&self) -> &str {
        &self.series.slug
    }

    pub fn ratios(&self) -> Vec<f64> {
        self.batches.iter().map(|b| b.dem_over_rep).collect()
    }
}

/// Run the batch calculation over a single state.
pub fn analyze_state(
    series: StateTimeSeries,
    policy: MonotonicPolicy,
) -> AnalysisResult<StateAnalysis> {
    let batches = compute_deltas_with(series.records(), policy)?;
    Ok(StateAnalysis { series, batches })
}

/// A row of the exported table. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "")]
    pub index: usize,
    pub votes: u64,
    pub eevp: i64,
    pub eevp_source: String,
    pub timestamp: String,
    pub state: String,
    pub expected_votes: i64,
    pub trump2016: i64,
    pub votes2012: i64,
    pub votes2016: i64,
    pub vote_share_rep: f64,
    pub vote_share_dem: f64,
    pub vote_share_trd: f64,
    pub delta_votes: i64,
    pub total_rep_votes: f64,
    pub total_dem_votes: f64,
    pub delta_rep: f64,
    pub delta_dem: f64,
    pub delta_rep_share: f64,
    pub delta_dem_share: f64,
    pub timestamp_alt: String,
    pub dem_over_rep: f64,
}

/// The consolidated table across all states, in the order states were added.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn from_states<'a, I>(analyses: I) -> Self
    where
        I: IntoIterator<Item = &'a StateAnalysis>,
    {
        analyses
            .into_iter()
            .fold(ResultTable::default(), |mut table, analysis| {
                table.push_state(analysis);
                table
            })
    }

    pub fn push_state(&mut self, analysis: &StateAnalysis) {
        let series = &analysis.series;
        let race = &series.race;

        let points = series
            .records()
            .iter()
            .zip(series.reporting())
            .zip(&analysis.batches);

        for ((record, reporting), batch) in points {
            let index = self.rows.len();
            self.rows.push(ResultRow {
                index,
                votes: record.votes,
                eevp: reporting.eevp,
                eevp_source: reporting.eevp_source.clone(),
                timestamp: record.timestamp.clone(),
                state: race.state_name.clone(),
                expected_votes: race.expected_votes,
                trump2016: race.trump2016,
                votes2012: race.votes2012,
                votes2016: race.votes2016,
                vote_share_rep: record.share_rep,
                vote_share_dem: record.share_dem,
                vote_share_trd: record.share_third(),
                delta_votes: batch.delta_votes,
                total_rep_votes: batch.total_rep,
                total_dem_votes: batch.total_dem,
                delta_rep: batch.delta_rep,
                delta_dem: batch.delta_dem,
                delta_rep_share: batch.delta_rep_share,
                delta_dem_share: batch.delta_dem_share,
                timestamp_alt: alternate_timestamp(&record.timestamp),
                dem_over_rep: batch.dem_over_rep,
            });
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// "2020-11-04T01:02:03Z" -> "2020-11-04 01:02:03"
fn alternate_timestamp(timestamp: &str) -> String {
    timestamp.replace('T', " ").replace('Z', "")
}
