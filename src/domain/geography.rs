//! Static country → state → city table behind the cascading selects.
//!
//! Unknown keys produce empty lists, never errors.

struct StateEntry {
    name: &'static str,
    cities: &'static [&'static str],
}

struct CountryEntry {
    name: &'static str,
    states: &'static [StateEntry],
}

static GEOGRAPHY: &[CountryEntry] = &[
    CountryEntry {
        name: "India",
        states: &[
            StateEntry {
                name: "Maharashtra",
                cities: &["Mumbai", "Pune"],
            },
            StateEntry {
                name: "Delhi",
                cities: &["New Delhi"],
            },
        ],
    },
    CountryEntry {
        name: "USA",
        states: &[
            StateEntry {
                name: "California",
                cities: &["Los Angeles", "San Francisco"],
            },
            StateEntry {
                name: "Texas",
                cities: &["Houston", "Austin"],
            },
        ],
    },
];

fn country(name: &str) -> Option<&'static CountryEntry> {
    GEOGRAPHY.iter().find(|c| c.name == name)
}

/// Supported countries, in display order.
pub fn countries() -> Vec<&'static str> {
    GEOGRAPHY.iter().map(|c| c.name).collect()
}

pub fn states_of(country_name: &str) -> Vec<&'static str> {
    country(country_name)
        .map(|c| c.states.iter().map(|s| s.name).collect())
        .unwrap_or_default()
}

pub fn cities_of(country_name: &str, state_name: &str) -> Vec<&'static str> {
    country(country_name)
        .and_then(|c| c.states.iter().find(|s| s.name == state_name))
        .map(|s| s.cities.to_vec())
        .unwrap_or_default()
}
