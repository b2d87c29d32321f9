#[macro_use]
extern crate serde_derive;

pub mod configuration;
pub mod data;
pub mod defs;
pub mod engine;
pub mod error;
pub mod output;
pub mod presentation;
pub mod seats;
pub mod selection;
pub mod store;
pub mod style;

pub use crate::data::features::FeatureAttributes;
pub use crate::defs::{CandidateRecord, DistrictId, PartyBucket};
pub use crate::error::{DataLoadError, Error};
pub use crate::selection::{Selection, SelectionBridge, SelectionView};
pub use crate::store::DistrictIndex;

/// Every map feature must name a district present in the results.
pub fn check_features(index: &DistrictIndex, features: &[FeatureAttributes]) -> Vec<Error> {
    features
        .iter()
        .filter(|f| !index.contains(&f.district))
        .map(|f| Error::UnknownDistrict(f.district.clone()))
        .collect()
}
