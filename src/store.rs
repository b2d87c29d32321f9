use crate::data::records::{self, RecordFormat};
use crate::defs::{CandidateRecord, DistrictId};
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Candidate records grouped by district.
///
/// Districts iterate in the order they were first seen in the raw records,
/// and each district's candidates keep their load order. The index is
/// never modified once built.
#[derive(Debug, Default)]
pub struct DistrictIndex {
    districts: Vec<(DistrictId, Vec<CandidateRecord>)>,
    positions: HashMap<DistrictId, usize>, // district -> slot in `districts`
}

impl DistrictIndex {
    pub fn load<I>(raw_records: I) -> DistrictIndex
    where
        I: IntoIterator<Item = CandidateRecord>,
    {
        let mut index = DistrictIndex::default();
        for record in raw_records {
            let slot = match index.positions.get(&record.district).copied() {
                Some(slot) => slot,
                None => {
                    let slot = index.districts.len();
                    index.positions.insert(record.district.clone(), slot);
                    index.districts.push((record.district.clone(), Vec::new()));
                    slot
                }
            };
            index.districts[slot].1.push(record);
        }
        index
    }

    pub fn from_path(path: &Path, format: Option<RecordFormat>) -> Result<DistrictIndex> {
        let rows = records::load(path, format)?;
        let index = DistrictIndex::load(rows);
        log::info!(
            "loaded {} candidate records across {} districts from {}",
            index.record_count(),
            index.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn get(&self, district: &DistrictId) -> Option<&[CandidateRecord]> {
        self.positions
            .get(district)
            .map(|&slot| self.districts[slot].1.as_slice())
    }

    pub fn contains(&self, district: &DistrictId) -> bool {
        self.positions.contains_key(district)
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.districts.iter().map(|(_, c)| c.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DistrictId, &[CandidateRecord])> {
        self.districts.iter().map(|(d, c)| (d, c.as_slice()))
    }

    pub fn districts(&self) -> impl Iterator<Item = &DistrictId> {
        self.districts.iter().map(|(d, _)| d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(district: &str, name: &str) -> CandidateRecord {
        CandidateRecord {
            election: "2020-11-03".to_string(),
            district: DistrictId::from(district),
            party: "Democratic".to_string(),
            name: name.to_string(),
            votes: 10,
            elected: false,
            note: None,
        }
    }

    #[test]
    fn groups_in_first_occurrence_order() {
        let index = DistrictIndex::load(vec![
            candidate("9", "a"),
            candidate("2", "b"),
            candidate("9", "c"),
            candidate("10", "d"),
            candidate("2", "e"),
        ]);
        let order: Vec<&str> = index.districts().map(|d| d.as_str()).collect();
        assert_eq!(order, vec!["9", "2", "10"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.record_count(), 5);

        let names: Vec<&str> = index
            .get(&DistrictId::from("2"))
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "e"]);
    }

    #[test]
    fn missing_district() {
        let index = DistrictIndex::load(vec![candidate("1", "a")]);
        assert!(index.get(&DistrictId::from("4")).is_none());
        assert!(!index.contains(&DistrictId::from("4")));
        assert!(DistrictIndex::load(Vec::new()).is_empty());
    }
}
