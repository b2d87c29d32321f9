use crate::defs::DistrictId;
use std::io;
use std::path::PathBuf;

// the raw data source could not be read or parsed; the map overlay and
// selection handling must not be set up after one of these
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("unable to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown record format: {0}")]
    UnknownFormat(String),
    #[error("feature {index} has no {field} property")]
    MissingField { index: usize, field: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("data unavailable: {0}")]
    DataLoad(#[from] DataLoadError),
    #[error("district {district}: expected exactly one elected candidate, found {elected}")]
    InvariantViolation { district: DistrictId, elected: usize },
    #[error("district {0}: vote total exceeds the supported range")]
    VoteOverflow(DistrictId),
    #[error("unknown district: {0}")]
    UnknownDistrict(DistrictId),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("district {0} cannot be used as an export file name")]
    FileName(DistrictId),
    #[error("unable to write {}: {}", .path.display(), .source)]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
