//
// Parse the per-candidate election results file.
// The source is a JSON array of candidate objects, e.g.
//   [{"election": "2020-11-03", "district": 7, "party": "Democratic",
//     "name": "...", "votes": 12345, "elected": true, "note": "..."}, ...]
// or a CSV file with the same column names. Either may be gzipped.
//

use crate::defs::CandidateRecord;
use crate::error::DataLoadError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    pub fn from_name(name: &str) -> Result<RecordFormat, DataLoadError> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(RecordFormat::Json),
            "csv" => Ok(RecordFormat::Csv),
            _ => Err(DataLoadError::UnknownFormat(name.to_string())),
        }
    }

    // infer from the extension, looking through a trailing .gz
    pub fn from_path(path: &Path) -> Option<RecordFormat> {
        let inner = if is_gzip(path) {
            Path::new(path.file_stem()?)
        } else {
            path
        };
        let ext = inner.extension()?.to_str()?;
        RecordFormat::from_name(ext).ok()
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

pub fn parse_json<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, DataLoadError> {
    let rows: Vec<CandidateRecord> = serde_json::from_reader(reader)?;
    Ok(rows)
}

pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, DataLoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows: Vec<CandidateRecord> = Vec::new();
    for result in rdr.deserialize() {
        let record: CandidateRecord = result?;
        rows.push(record);
    }
    Ok(rows)
}

pub fn parse<R: Read>(reader: R, format: RecordFormat) -> Result<Vec<CandidateRecord>, DataLoadError> {
    match format {
        RecordFormat::Json => parse_json(reader),
        RecordFormat::Csv => parse_csv(reader),
    }
}

/// Reads every candidate record from `path`. When `format` is not given
/// it is inferred from the file extension.
pub fn load(path: &Path, format: Option<RecordFormat>) -> Result<Vec<CandidateRecord>, DataLoadError> {
    let format = match format.or_else(|| RecordFormat::from_path(path)) {
        Some(format) => format,
        None => return Err(DataLoadError::UnknownFormat(path.display().to_string())),
    };
    let f = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(f);
    let rows = if is_gzip(path) {
        parse(GzDecoder::new(reader), format)?
    } else {
        parse(reader, format)?
    };
    log::debug!("read {} candidate records from {}", rows.len(), path.display());
    Ok(rows)
}
