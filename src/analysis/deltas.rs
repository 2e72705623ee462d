use super::{AnalysisError, AnalysisResult};
use crate::model::{BatchRecord, DerivedBatch};

/// How to treat a cumulative vote count that goes down between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonotonicPolicy {
    /// Compute a negative `delta_votes` and carry on.
    Permissive,
    /// Reject the sequence with `AnalysisError::NonMonotonicInput`.
    Strict,
}

impl Default for MonotonicPolicy {
    fn default() -> Self {
        MonotonicPolicy::Permissive
    }
}

/// Turn one race's cumulative snapshots into per-batch deltas and D/R ratios,
/// using the permissive policy.
pub fn compute_deltas(records: &[BatchRecord]) -> AnalysisResult<Vec<DerivedBatch>> {
    compute_deltas_with(records, MonotonicPolicy::Permissive)
}

/// Single pass over `records`; each output only looks at the current record
/// and the one before it. Records are assumed to already be in reporting
/// order.
pub fn compute_deltas_with(
    records: &[BatchRecord],
    policy: MonotonicPolicy,
) -> AnalysisResult<Vec<DerivedBatch>> {
    let first = records.first().ok_or(AnalysisError::EmptyInput)?;

    let mut batches = Vec::with_capacity(records.len());

    // No predecessor, so no deltas yet
    batches.push(DerivedBatch {
        total_rep: first.total_rep(),
        total_dem: first.total_dem(),
        ..DerivedBatch::default()
    });

    for (index, pair) in records.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);

        if policy == MonotonicPolicy::Strict && current.votes < previous.votes {
            return Err(AnalysisError::NonMonotonicInput {
                index: index + 1,
                previous: previous.votes,
                current: current.votes,
            });
        }

        batches.push(derive_batch(previous, current));
    }

    Ok(batches)
}

fn derive_batch(previous: &BatchRecord, current: &BatchRecord) -> DerivedBatch {
    let delta_votes = current.votes as i64 - previous.votes as i64;

    let total_rep = current.total_rep();
    let total_dem = current.total_dem();
    let delta_rep = total_rep - previous.total_rep();
    let delta_dem = total_dem - previous.total_dem();

    let (delta_rep_share, delta_dem_share) = if delta_votes != 0 {
        (delta_rep / delta_votes as f64, delta_dem / delta_votes as f64)
    } else {
        (0.0, 0.0)
    };

    DerivedBatch {
        delta_votes,
        total_rep,
        total_dem,
        delta_rep,
        delta_dem,
        delta_rep_share,
        delta_dem_share,
        dem_over_rep: ratio_or_zero(delta_dem_share, delta_rep_share),
    }
}

/// x/0 and 0/0 both come out as 0.0; downstream consumers read 0.0 as
/// "no signal for this batch".
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
