use super::{ExportError, Result};
use crate::analysis::ResultTable;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the consolidated table to `path` as UTF-8 CSV with a header row.
pub fn write_table(table: &ResultTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_table_to(table, file)
}

pub fn write_table_to<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut writer = ::csv::Writer::from_writer(writer);
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: "<csv>".to_string(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_state, MonotonicPolicy};
    use crate::model::{BatchRecord, RaceContext, Reporting, StateTimeSeries};

    const HEADER: &str = ",votes,eevp,eevp_source,timestamp,state,expected_votes,trump2016,\
votes2012,votes2016,vote_share_rep,vote_share_dem,vote_share_trd,delta_votes,\
total_rep_votes,total_dem_votes,delta_rep,delta_dem,delta_rep_share,delta_dem_share,\
timestamp_alt,dem_over_rep";

    fn table() -> ResultTable {
        let race = RaceContext {
            state_name: "Georgia".to_string(),
            expected_votes: 5_000_000,
            trump2016: 2_089_104,
            votes2012: 3_900_050,
            votes2016: 4_114_732,
        };
        let mut series = StateTimeSeries::new("georgia", race);
        series.push(
            BatchRecord::new("2020-11-04T00:10:00Z", 100, 0.5, 0.5),
            Reporting {
                eevp: 1,
                eevp_source: "edison".to_string(),
            },
        );
        series.push(
            BatchRecord::new("2020-11-04T00:20:00Z", 200, 0.5, 0.5),
            Reporting {
                eevp: 2,
                eevp_source: "edison".to_string(),
            },
        );
        let analysis = analyze_state(series, MonotonicPolicy::Permissive).unwrap();
        ResultTable::from_states(vec![&analysis])
    }

    #[test]
    fn header_lists_columns_in_export_order() {
        let mut out = Vec::new();
        write_table_to(&table(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn rows_carry_state_context_and_derived_values() {
        let mut out = Vec::new();
        write_table_to(&table(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let second: Vec<&str> = text.lines().nth(2).unwrap().split(',').collect();

        assert_eq!(second.len(), 22);
        assert_eq!(second[0], "1");
        assert_eq!(second[1], "200");
        assert_eq!(second[5], "Georgia");
        assert_eq!(second[13], "100");
        assert_eq!(second[20], "2020-11-04 00:20:00");
        assert_eq!(second[21].parse::<f64>().unwrap(), 1.0);
    }
}
