//
// Read the attribute table of the district boundary layer (a GeoJSON
// FeatureCollection). Only feature properties are read; geometry belongs
// to the map renderer.
//

use crate::defs::DistrictId;
use crate::error::DataLoadError;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// which feature properties carry the values we join on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFields {
    pub district: String,
    pub url: String,
    pub party: String,
}

impl Default for FeatureFields {
    fn default() -> FeatureFields {
        FeatureFields {
            district: "leg_distri".to_string(),
            url: "url".to_string(),
            party: "party".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureAttributes {
    pub district: DistrictId,
    pub url: Option<String>,
    pub party: Option<String>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
}

fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn parse<R: Read>(reader: R, fields: &FeatureFields) -> Result<Vec<FeatureAttributes>, DataLoadError> {
    let collection: FeatureCollection = serde_json::from_reader(reader)?;
    let mut rows = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let properties = feature.properties.unwrap_or_default();
        let lookup = |name: &str| properties.get(name).and_then(property_text);
        // same conversion as the results file, so ids join whatever their form
        let district = match properties
            .get(&fields.district)
            .and_then(|v| DistrictId::deserialize(v).ok())
        {
            Some(d) => d,
            None => {
                return Err(DataLoadError::MissingField {
                    index,
                    field: fields.district.clone(),
                })
            }
        };
        rows.push(FeatureAttributes {
            district,
            url: lookup(&fields.url),
            party: lookup(&fields.party),
        });
    }
    Ok(rows)
}

pub fn load(path: &Path, fields: &FeatureFields) -> Result<Vec<FeatureAttributes>, DataLoadError> {
    let f = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse(BufReader::new(f), fields)?;
    log::debug!("read {} district features from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYER: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"leg_distri": 12, "url": "https://example.org/12", "party": "R"},
             "geometry": {"type": "Point", "coordinates": [0, 0]}},
            {"type": "Feature",
             "properties": {"leg_distri": "3", "party": "D"},
             "geometry": null}
        ]
    }"#;

    #[test]
    fn reads_properties_in_file_order() {
        let rows = parse(LAYER.as_bytes(), &FeatureFields::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].district, DistrictId::from("12"));
        assert_eq!(rows[0].url.as_ref().map(String::as_str), Some("https://example.org/12"));
        assert_eq!(rows[1].district, DistrictId::from("3"));
        assert_eq!(rows[1].url, None);
        assert_eq!(rows[1].party.as_ref().map(String::as_str), Some("D"));
    }

    #[test]
    fn missing_district_property() {
        let fields = FeatureFields {
            district: "district".to_string(),
            ..FeatureFields::default()
        };
        match parse(LAYER.as_bytes(), &fields) {
            Err(DataLoadError::MissingField { index: 0, field }) => assert_eq!(field, "district"),
            other => panic!("expected a missing field error, got {:?}", other),
        }
    }

    #[test]
    fn district_ids_match_the_results_file() {
        let layer = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"leg_distri": 7.0}, "geometry": null},
            {"type": "Feature", "properties": {"leg_distri": "07"}, "geometry": null},
            {"type": "Feature", "properties": {"leg_distri": 7}, "geometry": null}
        ]}"#;
        let rows = parse(layer.as_bytes(), &FeatureFields::default()).unwrap();
        assert!(rows.iter().all(|f| f.district == DistrictId::from(7u32)));
    }

    #[test]
    fn null_district_property_is_missing() {
        let layer = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"leg_distri": null}, "geometry": null}
        ]}"#;
        assert!(matches!(
            parse(layer.as_bytes(), &FeatureFields::default()),
            Err(DataLoadError::MissingField { index: 0, .. })
        ));
    }
}
