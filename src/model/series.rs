use super::race::Race;
use super::BatchRecord;

/// Race-level values repeated on every exported row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceContext {
    pub state_name: String,
    pub expected_votes: i64,
    pub trump2016: i64,
    pub votes2012: i64,
    pub votes2016: i64,
}

/// Reporting progress fields that ride alongside a `BatchRecord` but are not
/// used by the calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reporting {
    pub eevp: i64,
    pub eevp_source: String,
}

/// One state's ordered snapshots. `records` and `reporting` are index-aligned.
#[derive(Debug, Clone)]
pub struct StateTimeSeries {
    pub slug: String,
    pub race: RaceContext,
    records: Vec<BatchRecord>,
    reporting: Vec<Reporting>,
}

impl StateTimeSeries {
    pub fn new(slug: impl Into<String>, race: RaceContext) -> Self {
        StateTimeSeries {
            slug: slug.into(),
            race,
            records: Vec::new(),
            reporting: Vec::new(),
        }
    }

    /// Build from a parsed race, reading the two candidates' shares by key.
    pub fn from_race(slug: &str, race: &Race, rep_key: &str, dem_key: &str) -> Self {
        let context = RaceContext {
            state_name: race.state_name.clone(),
            expected_votes: race.tot_exp_vote,
            trump2016: race.trump2016,
            votes2012: race.votes2012,
            votes2016: race.votes2016,
        };

        let mut series = StateTimeSeries::new(slug, context);
        for point in &race.timeseries {
            series.push(
                BatchRecord::new(
                    point.timestamp.clone(),
                    point.votes,
                    point.share(rep_key),
                    point.share(dem_key),
                ),
                Reporting {
                    eevp: point.eevp,
                    eevp_source: point.eevp_source.clone(),
                },
            );
        }
        series
    }

    pub fn push(&mut self, record: BatchRecord, reporting: Reporting) {
        self.records.push(record);
        self.reporting.push(reporting);
    }

    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    pub fn reporting(&self) -> &[Reporting] {
        &self.reporting
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
