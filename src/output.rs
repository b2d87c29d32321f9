use crate::defs::DistrictId;
use crate::error::{Error, Result};
use crate::presentation::DistrictViewModel;
use crate::seats::SeatSummary;
use crate::selection::SelectionBridge;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct Parameters<'a> {
    description: &'a str,
    districts: usize,
    records: usize,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    parameters: Parameters<'a>,
    summary: &'a SeatSummary,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let output_error = |source| Error::Output {
        path: path.to_path_buf(),
        source,
    };
    let fd = File::create(path).map_err(output_error)?;
    serde_json::to_writer_pretty(BufWriter::new(fd), value)
        .map_err(|e| output_error(e.into()))?;
    Ok(())
}

// district ids come from the data file; only plain names may become paths
fn view_file_name(district: &DistrictId) -> Result<String> {
    let id = district.as_str();
    let unsafe_name = id.is_empty()
        || id == "."
        || id == ".."
        || id.chars().any(|c| c == '/' || c == '\\' || c == ':' || c.is_control());
    if unsafe_name {
        return Err(Error::FileName(district.clone()));
    }
    Ok(format!("{}.json", id))
}

/// Writes `{dir}/districts/{district}.json` for every district and
/// `{dir}/summary.json` for the seat chart. Returns the files written,
/// districts first in discovery order. Nothing is written when any
/// district fails to aggregate or has an id unusable as a file name.
pub fn export(bridge: &SelectionBridge, description: &str, dir: &Path) -> Result<Vec<PathBuf>> {
    let index = bridge.index();
    let district_dir = dir.join("districts");

    let districts: Vec<_> = index.districts().collect();
    let views: Vec<(PathBuf, DistrictViewModel)> = districts
        .par_iter()
        .map(|district| {
            let path = district_dir.join(view_file_name(district)?);
            Ok((path, bridge.view(district)?))
        })
        .collect::<Result<_>>()?;
    let summary = SeatSummary::build(index)?;

    fs::create_dir_all(&district_dir).map_err(|source| Error::Output {
        path: district_dir.clone(),
        source,
    })?;
    let mut written = Vec::with_capacity(views.len() + 1);
    for (path, view) in views {
        write_json(&path, &view)?;
        written.push(path);
    }

    let path = dir.join("summary.json");
    write_json(
        &path,
        &SummaryOutput {
            parameters: Parameters {
                description,
                districts: index.len(),
                records: index.record_count(),
            },
            summary: &summary,
        },
    )?;
    written.push(path);
    log::info!("wrote {} files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::CandidateRecord;
    use crate::presentation::Formatter;
    use crate::store::DistrictIndex;

    fn candidate(district: &str, party: &str, votes: u64, elected: bool) -> CandidateRecord {
        CandidateRecord {
            election: "2020-11-03".to_string(),
            district: DistrictId::from(district),
            party: party.to_string(),
            name: format!("{} {}", party, district),
            votes,
            elected,
            note: None,
        }
    }

    #[test]
    fn writes_one_file_per_district_and_a_summary() {
        let index = DistrictIndex::load(vec![
            candidate("3", "Democratic", 10, true),
            candidate("1", "Republican", 20, true),
            candidate("1", "Democratic", 5, false),
        ]);
        let bridge = SelectionBridge::new(&index, Formatter::default());
        let dir = tempfile::tempdir().unwrap();
        let written = export(&bridge, "Test Senate", dir.path()).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("districts").join("3.json"),
                dir.path().join("districts").join("1.json"),
                dir.path().join("summary.json"),
            ]
        );

        let summary: serde_json::Value =
            serde_json::from_reader(File::open(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["parameters"]["districts"], 2);
        assert_eq!(summary["summary"]["seats"][0], "Democratic");
        assert_eq!(summary["summary"]["seats"][1], "Republican");

        let district: serde_json::Value =
            serde_json::from_reader(File::open(dir.path().join("districts").join("1.json")).unwrap()).unwrap();
        assert_eq!(district["party_code"], "R");
        assert_eq!(district["shares"][1]["visible"], true);
    }

    #[test]
    fn invalid_district_aborts_export() {
        let index = DistrictIndex::load(vec![candidate("1", "Republican", 20, false)]);
        let bridge = SelectionBridge::new(&index, Formatter::default());
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            export(&bridge, "Test Senate", dir.path()),
            Err(Error::InvariantViolation { .. })
        ));
    }

    #[test]
    fn district_named_summary_keeps_its_own_file() {
        let index = DistrictIndex::load(vec![
            candidate("summary", "Democratic", 10, true),
            candidate("2", "Republican", 20, true),
        ]);
        let bridge = SelectionBridge::new(&index, Formatter::default());
        let dir = tempfile::tempdir().unwrap();
        let written = export(&bridge, "Test Senate", dir.path()).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|p| written.iter().filter(|q| *q == p).count() == 1));

        let district: serde_json::Value = serde_json::from_reader(
            File::open(dir.path().join("districts").join("summary.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(district["party_code"], "D");
        let summary: serde_json::Value =
            serde_json::from_reader(File::open(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["parameters"]["districts"], 2);
    }

    #[test]
    fn path_like_district_ids_are_refused() {
        for id in &["../escaped", "a/b", "..", "c:\\temp", ""] {
            let index = DistrictIndex::load(vec![
                candidate("1", "Republican", 20, true),
                candidate(id, "Democratic", 10, true),
            ]);
            let bridge = SelectionBridge::new(&index, Formatter::default());
            let root = tempfile::tempdir().unwrap();
            let out = root.path().join("out");
            match export(&bridge, "Test Senate", &out) {
                Err(Error::FileName(d)) => assert_eq!(d.as_str(), *id),
                other => panic!("expected a file name error for {:?}, got {:?}", id, other),
            }
            assert!(!out.exists());
            assert!(!root.path().join("escaped.json").exists());
        }
    }
}
