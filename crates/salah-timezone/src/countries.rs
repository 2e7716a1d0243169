//! Country to offset dataset used when a location is entered by hand.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use salah_types::{Result, SalahError, TimezoneOffset};
use serde::Deserialize;
use tracing::debug;

const EMBEDDED: &str = include_str!("../data/countries.json");

#[derive(Debug, Deserialize)]
struct Dataset {
    version: String,
    countries: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    name: String,
    timezone_offset: TimezoneOffset,
}

/// Immutable lookup of standard offsets by country name.
///
/// Names match case-insensitively after trimming.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryTimezones {
    version: String,
    offsets: BTreeMap<String, TimezoneOffset>,
}

impl CountryTimezones {
    /// Dataset compiled into the crate.
    pub fn load_embedded() -> Result<Self> {
        Self::from_json(EMBEDDED)
    }

    /// Parses a `{ "version", "countries": [{ "name", "timezone_offset" }] }` document.
    ///
    /// # Errors
    /// `InvalidConfiguration` for malformed JSON, an out-of-range offset, or a country listed
    /// twice.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)
            .map_err(|e| SalahError::invalid_config(format!("Invalid country dataset: {e}")))?;
        let mut offsets = BTreeMap::new();
        for entry in dataset.countries {
            match offsets.entry(normalize(&entry.name)) {
                Entry::Vacant(slot) => {
                    slot.insert(entry.timezone_offset);
                }
                Entry::Occupied(_) => {
                    return Err(SalahError::invalid_config(format!(
                        "Country {:?} listed twice",
                        entry.name
                    )));
                }
            }
        }
        debug!(version = %dataset.version, countries = offsets.len(), "loaded country dataset");
        Ok(Self {
            version: dataset.version,
            offsets,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// # Errors
    /// `TimezoneResolution` when the country is not in the dataset.
    pub fn offset_for(&self, country: &str) -> Result<TimezoneOffset> {
        self.offsets.get(&normalize(country)).copied().ok_or_else(|| {
            SalahError::timezone_resolution(format!("No timezone offset known for {country:?}"))
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dataset() {
        let countries = CountryTimezones::load_embedded().unwrap();
        assert!(!countries.is_empty());
        assert!(!countries.version().is_empty());
        assert_eq!(countries.offset_for("Pakistan").unwrap().hours(), 5.0);
        assert_eq!(countries.offset_for("  india ").unwrap().hours(), 5.5);
        assert_eq!(countries.offset_for("Nepal").unwrap().hours(), 5.75);
    }

    #[test]
    fn test_unknown_country() {
        let countries = CountryTimezones::load_embedded().unwrap();
        assert!(matches!(
            countries.offset_for("Atlantis"),
            Err(SalahError::TimezoneResolution { .. })
        ));
    }

    #[test]
    fn test_from_json_validates_offsets() {
        let ok = r#"{"version":"t","countries":[{"name":"Here","timezone_offset":-3.5}]}"#;
        let countries = CountryTimezones::from_json(ok).unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries.offset_for("here").unwrap().hours(), -3.5);

        let out_of_range = r#"{"version":"t","countries":[{"name":"X","timezone_offset":20}]}"#;
        assert!(matches!(
            CountryTimezones::from_json(out_of_range),
            Err(SalahError::InvalidConfiguration { .. })
        ));
        assert!(CountryTimezones::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_rejects_duplicate_countries() {
        let duplicated = r#"{"version":"t","countries":[
            {"name":"Pakistan","timezone_offset":5},
            {"name":" PAKISTAN","timezone_offset":4}
        ]}"#;
        assert!(matches!(
            CountryTimezones::from_json(duplicated),
            Err(SalahError::InvalidConfiguration { .. })
        ));
    }
}
