pub mod batch;
pub mod race;
pub mod series;

pub use batch::{BatchRecord, DerivedBatch};
pub use series::{RaceContext, Reporting, StateTimeSeries};
