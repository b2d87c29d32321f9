/*
 * core types
 */

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// identifies a district. Raw data carries these as numbers or strings;
// every source goes through `canonical` so `7`, `7.0`, "7" and "07" are
// the same key
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Default)]
pub struct DistrictId(String);

// numeric text ("07", "7.0") becomes its plain integer form; anything
// else is kept as written, minus surrounding whitespace
fn canonical(text: &str) -> String {
    let text = text.trim();
    let (whole, fraction) = match text.find('.') {
        Some(dot) => (&text[..dot], &text[dot + 1..]),
        None => (text, ""),
    };
    let numeric = !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b == b'0');
    if !numeric {
        return text.to_string();
    }
    match whole.trim_start_matches('0') {
        "" => "0".to_string(),
        digits => digits.to_string(),
    }
}

impl DistrictId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DistrictId {
    fn from(s: &str) -> DistrictId {
        DistrictId(canonical(s))
    }
}

impl From<String> for DistrictId {
    fn from(s: String) -> DistrictId {
        DistrictId(canonical(&s))
    }
}

impl From<u32> for DistrictId {
    fn from(n: u32) -> DistrictId {
        DistrictId(n.to_string())
    }
}

impl Serialize for DistrictId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct DistrictIdVisitor;

impl<'de> Visitor<'de> for DistrictIdVisitor {
    type Value = DistrictId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a district number or string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DistrictId, E> {
        Ok(DistrictId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DistrictId, E> {
        Ok(DistrictId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<DistrictId, E> {
        if v.is_finite() && v.fract() == 0.0 && v >= 0.0 {
            Ok(DistrictId(format!("{}", v as u64)))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DistrictId, E> {
        Ok(DistrictId::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<DistrictId, E> {
        self.visit_str(&v)
    }
}

impl<'de> Deserialize<'de> for DistrictId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<DistrictId, D::Error> {
        deserializer.deserialize_any(DistrictIdVisitor)
    }
}

// the three aggregation / display categories; every party other than the
// two majors is flattened into Other
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum PartyBucket {
    Democratic,
    Republican,
    Other,
}

impl PartyBucket {
    pub const ALL: [PartyBucket; 3] = [
        PartyBucket::Democratic,
        PartyBucket::Republican,
        PartyBucket::Other,
    ];

    /// Buckets a raw party string by exact match.
    pub fn classify(party: &str) -> PartyBucket {
        match party {
            "Democratic" => PartyBucket::Democratic,
            "Republican" => PartyBucket::Republican,
            _ => PartyBucket::Other,
        }
    }
}

impl fmt::Display for PartyBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PartyBucket::Democratic => "Democratic",
            PartyBucket::Republican => "Republican",
            PartyBucket::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Short party label used in narrative text. Independent of bucketing:
/// third parties keep their own name rather than collapsing to "Other".
pub fn compact_party_name(party: &str) -> &str {
    match party {
        "Democratic" => "D",
        "Republican" => "R",
        other => other,
    }
}

// one candidate's result in one district, as loaded
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub election: String,
    pub district: DistrictId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub party: String,
    pub name: String,
    pub votes: u64,
    pub elected: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub note: Option<String>,
}

impl CandidateRecord {
    pub fn bucket(&self) -> PartyBucket {
        PartyBucket::classify(&self.party)
    }

    pub fn party_code(&self) -> &str {
        compact_party_name(&self.party)
    }

    // leading four characters of the election identifier
    pub fn year(&self) -> &str {
        match self.election.char_indices().nth(4) {
            Some((end, _)) => &self.election[..end],
            None => &self.election,
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let party: Option<String> = Option::deserialize(deserializer)?;
    Ok(party.unwrap_or_default())
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let note: Option<String> = Option::deserialize(deserializer)?;
    Ok(note.filter(|n| !n.is_empty()))
}

// summed votes per party bucket
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize)]
pub struct PartyTotals {
    pub democratic: u64,
    pub republican: u64,
    pub other: u64,
}

impl PartyTotals {
    // None when the bucket total would overflow; the totals are unchanged
    pub fn add(&mut self, bucket: PartyBucket, votes: u64) -> Option<()> {
        let slot = match bucket {
            PartyBucket::Democratic => &mut self.democratic,
            PartyBucket::Republican => &mut self.republican,
            PartyBucket::Other => &mut self.other,
        };
        *slot = slot.checked_add(votes)?;
        Some(())
    }

    pub fn get(&self, bucket: PartyBucket) -> u64 {
        match bucket {
            PartyBucket::Democratic => self.democratic,
            PartyBucket::Republican => self.republican,
            PartyBucket::Other => self.other,
        }
    }

    pub fn total(&self) -> Option<u64> {
        self.democratic
            .checked_add(self.republican)?
            .checked_add(self.other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> CandidateRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn district_numbers_and_strings_are_the_same_key() {
        let a = record(r#"{"election":"2020-11-03","district":7,"party":"Democratic","name":"A","votes":1,"elected":true}"#);
        let b = record(r#"{"election":"2020-11-03","district":"7","party":"Democratic","name":"B","votes":1,"elected":false}"#);
        assert_eq!(a.district, b.district);
        assert_eq!(a.district, DistrictId::from(7u32));
    }

    #[test]
    fn null_party_and_empty_note() {
        let r = record(r#"{"election":"2018","district":1,"party":null,"name":"A","votes":3,"elected":true,"note":""}"#);
        assert_eq!(r.party, "");
        assert_eq!(r.bucket(), PartyBucket::Other);
        assert_eq!(r.note, None);
    }

    #[test]
    fn compact_codes_pass_third_parties_through() {
        assert_eq!(compact_party_name("Democratic"), "D");
        assert_eq!(compact_party_name("Republican"), "R");
        assert_eq!(compact_party_name("Independent"), "Independent");
        assert_eq!(PartyBucket::classify("Independent"), PartyBucket::Other);
        assert_eq!(PartyBucket::classify("democratic"), PartyBucket::Other);
    }

    #[test]
    fn year_is_leading_four_characters() {
        let r = record(r#"{"election":"2022-general","district":1,"party":"Republican","name":"A","votes":3,"elected":true}"#);
        assert_eq!(r.year(), "2022");
        let short = record(r#"{"election":"22","district":1,"party":"Republican","name":"A","votes":3,"elected":true}"#);
        assert_eq!(short.year(), "22");
    }

    #[test]
    fn numeric_district_text_is_canonical() {
        assert_eq!(DistrictId::from("07"), DistrictId::from(7u32));
        assert_eq!(DistrictId::from(" 7.0 "), DistrictId::from(7u32));
        assert_eq!(DistrictId::from("000"), DistrictId::from(0u32));
        assert_eq!(DistrictId::from("7A").as_str(), "7A");
        assert_eq!(DistrictId::from("7.5").as_str(), "7.5");
        assert_eq!(DistrictId::from("..").as_str(), "..");
        let padded = record(r#"{"election":"2020","district":"07","party":"Democratic","name":"A","votes":1,"elected":true}"#);
        let float = record(r#"{"election":"2020","district":7.0,"party":"Democratic","name":"A","votes":1,"elected":true}"#);
        assert_eq!(padded.district, DistrictId::from(7u32));
        assert_eq!(float.district, DistrictId::from(7u32));
    }

    #[test]
    fn party_totals_refuse_to_overflow() {
        let mut totals = PartyTotals::default();
        assert_eq!(totals.add(PartyBucket::Democratic, u64::MAX), Some(()));
        assert_eq!(totals.add(PartyBucket::Democratic, 1), None);
        assert_eq!(totals.democratic, u64::MAX);
        assert_eq!(totals.total(), Some(u64::MAX));
        assert_eq!(totals.add(PartyBucket::Other, 1), Some(()));
        assert_eq!(totals.total(), None);
    }
}
