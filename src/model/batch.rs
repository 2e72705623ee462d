/// One cumulative snapshot of a race's vote count.
///
/// Shares arrive rounded to 3 significant digits, which is not enough to
/// recover precise per-batch shares by differencing. The calculator works with
/// them as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub timestamp: String,
    pub votes: u64,
    pub share_rep: f64,
    pub share_dem: f64,
}

impl BatchRecord {
    pub fn new(timestamp: impl Into<String>, votes: u64, share_rep: f64, share_dem: f64) -> Self {
        BatchRecord {
            timestamp: timestamp.into(),
            votes,
            share_rep,
            share_dem,
        }
    }

    /// Share of everyone who is neither the rep nor the dem candidate.
    pub fn share_third(&self) -> f64 {
        1.0 - self.share_rep - self.share_dem
    }

    /// Running absolute Republican vote total implied by this snapshot.
    pub fn total_rep(&self) -> f64 {
        self.votes as f64 * self.share_rep
    }

    /// Running absolute Democratic vote total implied by this snapshot.
    pub fn total_dem(&self) -> f64 {
        self.votes as f64 * self.share_dem
    }
}

/// Per-batch metrics derived from two consecutive snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedBatch {
    pub delta_votes: i64,
    pub total_rep: f64,
    pub total_dem: f64,
    pub delta_rep: f64,
    pub delta_dem: f64,
    pub delta_rep_share: f64,
    pub delta_dem_share: f64,
    pub dem_over_rep: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_party_share_is_remainder() {
        let record = BatchRecord::new("2020-11-04T01:00:00Z", 1000, 0.5, 0.4);
        assert!((record.share_third() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn totals_scale_with_votes() {
        let record = BatchRecord::new("2020-11-04T01:00:00Z", 150, 0.52, 0.38);
        assert!((record.total_rep() - 78.0).abs() < 1e-9);
        assert!((record.total_dem() - 57.0).abs() < 1e-9);
    }
}
