use serde::{Deserialize, Serialize};
use std::fmt;

/// Field offsets of the observed listings-page schema. The page is
/// unversioned; if its layout ever shifts, this is the one place to edit.
pub const KEY_FIELD: usize = 2;
pub const DETAIL_FIELD: usize = 3;

/// Rows with fewer fields are spacers emitted by the page layout.
const MIN_DATA_FIELDS: usize = 2;

/// One central-office row extracted from the listings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeRecord {
    fields: Vec<String>,
}

impl OfficeRecord {
    /// Validates a raw extracted row. Spacer rows (one field or fewer) and
    /// rows without a usable location key are dropped silently.
    pub fn from_fields(fields: Vec<String>) -> Option<Self> {
        if fields.len() < MIN_DATA_FIELDS {
            return None;
        }
        match fields.get(KEY_FIELD) {
            Some(key) if !key.is_empty() => Some(Self { fields }),
            _ => None,
        }
    }

    /// Deduplication key, also the geocoding input.
    pub fn location_key(&self) -> &str {
        &self.fields[KEY_FIELD]
    }

    /// Companion field shown next to the key in CSV output.
    pub fn detail(&self) -> &str {
        self.fields
            .get(DETAIL_FIELD)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// One geocoding result, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn spacer_rows_are_rejected() {
        assert!(OfficeRecord::from_fields(vec![]).is_none());
        assert!(OfficeRecord::from_fields(strings(&["only one"])).is_none());
    }

    #[test]
    fn missing_or_empty_key_is_rejected() {
        assert!(OfficeRecord::from_fields(strings(&["CO", "Denver"])).is_none());
        assert!(OfficeRecord::from_fields(strings(&["CO", "Denver", ""])).is_none());
    }

    #[test]
    fn accessors_use_the_schema_offsets() {
        let record =
            OfficeRecord::from_fields(strings(&["CO", "Denver", "1600 Stout St", "DNVRCOMA"]))
                .expect("valid row");
        assert_eq!(record.location_key(), "1600 Stout St");
        assert_eq!(record.detail(), "DNVRCOMA");
    }

    #[test]
    fn detail_defaults_to_empty() {
        let record = OfficeRecord::from_fields(strings(&["CO", "Denver", "1600 Stout St"]))
            .expect("valid row");
        assert_eq!(record.detail(), "");
    }

    #[test]
    fn geopoint_renders_shortest_form() {
        let point = GeoPoint {
            lat: 10.0,
            lng: 20.0,
        };
        assert_eq!(point.to_string(), "10,20");
        let point = GeoPoint {
            lat: 39.7392,
            lng: -104.9903,
        };
        assert_eq!(point.to_string(), "39.7392,-104.9903");
    }
}
