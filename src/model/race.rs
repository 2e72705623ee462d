use serde::Deserialize;
use std::collections::HashMap;

/// Top-level race page as published per state.
#[derive(Debug, Deserialize)]
pub struct RacePage {
    pub data: RacePageData,
}

#[derive(Debug, Deserialize)]
pub struct RacePageData {
    #[serde(default)]
    pub races: Vec<Race>,
}

/// The subset of a race entry the pipeline reads. Everything else on the page
/// is dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Race {
    pub state_name: String,
    pub state_slug: String,
    pub tot_exp_vote: i64,
    pub trump2016: i64,
    pub votes2012: i64,
    pub votes2016: i64,
    pub timeseries: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TimeSeriesPoint {
    pub votes: u64,
    pub eevp: i64,
    pub eevp_source: String,
    pub timestamp: String,
    pub vote_shares: HashMap<String, f64>,
}

impl TimeSeriesPoint {
    /// Cumulative share for a candidate key, 0.0 when the page omits it.
    pub fn share(&self, candidate_key: &str) -> f64 {
        self.vote_shares.get(candidate_key).copied().unwrap_or(0.0)
    }
}
