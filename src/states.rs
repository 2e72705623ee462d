use lazy_static::lazy_static;
use regex::Regex;

/// States with a presidential race page, in export order.
pub const STATES: [&str; 50] = [
    "Alaska",
    "Alabama",
    "Arkansas",
    "Arizona",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Iowa",
    "Idaho",
    "Illinois",
    "Indiana",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Massachusetts",
    "Maryland",
    "Maine",
    "Michigan",
    "Minnesota",
    "Missouri",
    "Mississippi",
    "Montana",
    "North Carolina",
    "North Dakota",
    "Nebraska",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "Nevada",
    "New York",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Virginia",
    "Vermont",
    "Washington",
    "Wisconsin",
    "West Virginia",
    "Wyoming",
];

lazy_static! {
    static ref WHITESPACE_RX: Regex = Regex::new(r"\s+").unwrap();
}

/// "North Carolina" -> "north-carolina"
pub fn state_slug(name: &str) -> String {
    WHITESPACE_RX
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

/// Slugs for every state, or only those named in `filter` (matched by name or
/// slug, case-insensitively). Unknown names are returned in `unknown`.
pub fn select_states(filter: &[String]) -> (Vec<String>, Vec<String>) {
    if filter.is_empty() {
        return (STATES.iter().map(|s| state_slug(s)).collect(), Vec::new());
    }

    let wanted: Vec<String> = filter.iter().map(|s| state_slug(s)).collect();

    let selected = STATES
        .iter()
        .map(|s| state_slug(s))
        .filter(|slug| wanted.contains(slug))
        .collect::<Vec<_>>();

    let unknown = wanted
        .into_iter()
        .filter(|slug| !selected.contains(slug))
        .collect();

    (selected, unknown)
}
