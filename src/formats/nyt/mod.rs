use super::{FormatError, Result};
use crate::model::race::{Race, RacePage};
use crate::model::StateTimeSeries;
use std::fs;
use std::path::Path;

pub const DEFAULT_REP_KEY: &str = "trumpd";
pub const DEFAULT_DEM_KEY: &str = "bidenj";

/// Which `vote_shares` entries hold the two candidates being compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKeys {
    pub rep: String,
    pub dem: String,
}

impl Default for CandidateKeys {
    fn default() -> Self {
        CandidateKeys {
            rep: DEFAULT_REP_KEY.to_string(),
            dem: DEFAULT_DEM_KEY.to_string(),
        }
    }
}

pub fn parse_race_page(body: &str) -> Result<RacePage> {
    Ok(serde_json::from_str(body)?)
}

/// The presidential race is always listed first on a race page.
pub fn presidential_race(page: &RacePage) -> Result<&Race> {
    page.data.races.first().ok_or(FormatError::MissingRace)
}

pub fn parse_state_timeseries(
    body: &str,
    slug: &str,
    keys: &CandidateKeys,
) -> Result<StateTimeSeries> {
    let page = parse_race_page(body)?;
    let race = presidential_race(&page)?;
    Ok(StateTimeSeries::from_race(slug, race, &keys.rep, &keys.dem))
}

pub fn read_race_page(path: &Path) -> Result<RacePage> {
    parse_race_page(&read_body(path)?)
}

pub fn nyt_timeseries_reader(
    path: &Path,
    slug: &str,
    keys: &CandidateKeys,
) -> Result<StateTimeSeries> {
    parse_state_timeseries(&read_body(path)?, slug, keys)
}

fn read_body(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "data": {
            "races": [
                {
                    "race_id": "PA-G-P-2020-11-03",
                    "state_name": "Pennsylvania",
                    "state_slug": "pennsylvania",
                    "tot_exp_vote": 6900000,
                    "trump2016": 2970733,
                    "votes2012": 5753670,
                    "votes2016": 6165478,
                    "race_rating": "tossup",
                    "candidates": [{"candidate_key": "bidenj"}],
                    "timeseries": [
                        {
                            "votes": 100,
                            "eevp": 1,
                            "eevp_source": "edison",
                            "timestamp": "2020-11-04T01:00:00Z",
                            "vote_shares": {"trumpd": 0.5, "bidenj": 0.4}
                        },
                        {
                            "votes": 150,
                            "eevp": 2,
                            "eevp_source": "edison",
                            "timestamp": "2020-11-04T02:00:00Z",
                            "vote_shares": {"trumpd": 0.52}
                        }
                    ]
                },
                {
                    "state_name": "Pennsylvania",
                    "timeseries": []
                }
            ],
            "party_control": [],
            "liveUpdates": []
        },
        "meta": {"version": 1}
    }"#;

    #[test]
    fn reads_first_race_and_drops_unknown_fields() {
        let series = parse_state_timeseries(PAGE, "pennsylvania", &CandidateKeys::default())
            .unwrap();

        assert_eq!(series.slug, "pennsylvania");
        assert_eq!(series.race.state_name, "Pennsylvania");
        assert_eq!(series.race.expected_votes, 6_900_000);
        assert_eq!(series.race.trump2016, 2_970_733);
        assert_eq!(series.len(), 2);
        assert_eq!(series.records()[0].votes, 100);
        assert_eq!(series.records()[0].share_rep, 0.5);
        assert_eq!(series.reporting()[1].eevp, 2);
        assert_eq!(series.reporting()[1].eevp_source, "edison");
    }

    #[test]
    fn missing_share_defaults_to_zero() {
        let series = parse_state_timeseries(PAGE, "pennsylvania", &CandidateKeys::default())
            .unwrap();
        assert_eq!(series.records()[1].share_dem, 0.0);
    }

    #[test]
    fn custom_candidate_keys_are_honoured() {
        let keys = CandidateKeys {
            rep: "bidenj".to_string(),
            dem: "trumpd".to_string(),
        };
        let series = parse_state_timeseries(PAGE, "pennsylvania", &keys).unwrap();
        assert_eq!(series.records()[0].share_rep, 0.4);
        assert_eq!(series.records()[0].share_dem, 0.5);
    }

    #[test]
    fn page_without_races_is_an_error() {
        let body = r#"{"data": {"races": []}}"#;
        let result = parse_state_timeseries(body, "ohio", &CandidateKeys::default());
        assert!(matches!(result, Err(FormatError::MissingRace)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = parse_race_page("{not json");
        assert!(matches!(result, Err(FormatError::Json(_))));
    }
}
