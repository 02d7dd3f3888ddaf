//! Input preparation for state voter files.
//!
//! A [`StatePreparer`] locates a state's input, gathers any side data the
//! state's transformer needs before the first row, and streams the raw rows
//! in file order. Pennsylvania input is a directory of county files, each
//! with a sibling Zone Types file describing its district columns.

pub mod readers;

pub use readers::{NumberedRow, RowIter};

use crate::config::StateFormat;
use crate::error::{Result, VoterError};
use crate::models::StateCode;
use crate::states::pa::ZoneColumns;
use crate::states::{TransformerOptions, format_for};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Marker in the name of a Pennsylvania county voter file
const COUNTY_FILE_MARKER: &str = " FVE ";
const ZONE_TYPES_MARKER: &str = " Zone Types ";
const COUNTY_FILE_PATTERN: &str = "* FVE *.txt";

/// Located input for one state, ready to stream rows
#[derive(Debug)]
pub struct StatePreparer {
    format: &'static StateFormat,
    files: Vec<PathBuf>,
    options: TransformerOptions,
}

impl StatePreparer {
    /// Locate a state's input and load its side data.
    ///
    /// The explicit path wins; otherwise the format's default file is looked
    /// up under `{data_dir}/{state}/` and then directly under `data_dir`.
    pub fn new(state: StateCode, data_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let format = format_for(state);
        let path = locate_input(format, data_dir, explicit)?;

        let (files, options) = if path.is_dir() {
            let files = county_files(&path)?;
            let zones = load_zone_columns(&files)?;
            (files, TransformerOptions::default().with_zone_columns(zones))
        } else {
            (vec![path], TransformerOptions::default())
        };

        info!("{}: {} input file(s)", state, files.len());
        Ok(Self {
            format,
            files,
            options,
        })
    }

    pub fn state(&self) -> StateCode {
        self.format.state
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Side data for the state's transformer
    pub fn options(&self) -> &TransformerOptions {
        &self.options
    }

    /// Rows of every input file, read lazily and in order
    pub fn rows(&self) -> RowIter {
        let format = self.format;
        let rows = self
            .files
            .clone()
            .into_iter()
            .flat_map(move |path| match open_rows(format, &path) {
                Ok(rows) => rows,
                Err(e) => Box::new(std::iter::once(Err(e))) as RowIter,
            });
        Box::new(rows)
    }
}

fn locate_input(format: &StateFormat, data_dir: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.exists() {
            Ok(path.to_path_buf())
        } else {
            Err(VoterError::InputNotFound {
                path: path.to_path_buf(),
            })
        };
    }

    let candidates = [
        data_dir.join(format.state.dir_name()).join(format.default_file),
        data_dir.join(format.default_file),
    ];
    for candidate in &candidates {
        if candidate.exists() {
            debug!("{}: using input {}", format.state, candidate.display());
            return Ok(candidate.clone());
        }
    }
    Err(VoterError::InputNotFound {
        path: candidates[0].clone(),
    })
}

/// Open one input file with the reader its layout needs
fn open_rows(format: &'static StateFormat, path: &Path) -> Result<RowIter> {
    let is_listing = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("lst"));
    match (format.fixed_width, format.input_fields) {
        (Some(slices), Some(fields)) if is_listing => {
            readers::fixed_width_rows(fields, slices, path)
        }
        _ => readers::delimited_rows(format, path),
    }
}

/// County voter files in an input directory, sorted by name
fn county_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_text = dir.to_str().ok_or_else(|| {
        VoterError::configuration(format!("Input path {} is not valid UTF-8", dir.display()))
    })?;
    let pattern = format!("{}/{}", glob::Pattern::escape(dir_text), COUNTY_FILE_PATTERN);

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| VoterError::configuration(format!("Bad input pattern '{}': {}", pattern, e)))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable input entry: {}", e);
                None
            }
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(VoterError::InputNotFound {
            path: dir.join(COUNTY_FILE_PATTERN),
        });
    }
    Ok(files)
}

/// Zone Types file that sits beside a county voter file
pub fn zone_types_file(county_file: &Path) -> Option<PathBuf> {
    let name = county_file.file_name()?.to_str()?;
    name.contains(COUNTY_FILE_MARKER)
        .then(|| county_file.with_file_name(name.replacen(COUNTY_FILE_MARKER, ZONE_TYPES_MARKER, 1)))
}

/// Read every county's Zone Types file before any voter row is transformed.
///
/// Lines are tab separated: county, district column, code prefix, zone type.
fn load_zone_columns(county_files: &[PathBuf]) -> Result<ZoneColumns> {
    let mut zones = ZoneColumns::new();
    for county_file in county_files {
        let Some(path) = zone_types_file(county_file).filter(|path| path.exists()) else {
            warn!(
                "No Zone Types file for {}, using default district columns",
                county_file.display()
            );
            continue;
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(File::open(&path)?));
        for record in reader.byte_records() {
            let record = record?;
            let field = |i: usize| {
                record
                    .get(i)
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                    .unwrap_or_default()
            };
            zones.record(&field(0), &field(1), &field(3));
        }
        debug!("Loaded zone types from {}", path.display());
    }
    Ok(zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::pa::Zone;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_input_lookup_order() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join("co");
        fs::create_dir(&state_dir).unwrap();
        fs::write(temp_dir.path().join("co_sample.csv"), "VOTER_ID\n1\n").unwrap();

        let format = format_for(StateCode::Co);
        let found = locate_input(format, temp_dir.path(), None).unwrap();
        assert_eq!(found, temp_dir.path().join(format.default_file));

        fs::write(state_dir.join(format.default_file), "VOTER_ID\n2\n").unwrap();
        let found = locate_input(format, temp_dir.path(), None).unwrap();
        assert_eq!(found, state_dir.join(format.default_file));

        let missing = temp_dir.path().join("nope.csv");
        assert!(matches!(
            locate_input(format, temp_dir.path(), Some(missing.as_path())),
            Err(VoterError::InputNotFound { .. })
        ));
    }

    #[test]
    fn test_zone_types_file_name() {
        assert_eq!(
            zone_types_file(Path::new("/d/ADAMS FVE 20170102.txt")),
            Some(PathBuf::from("/d/ADAMS Zone Types 20170102.txt"))
        );
        assert_eq!(zone_types_file(Path::new("/d/ADAMS.txt")), None);
    }

    #[test]
    fn test_pennsylvania_directory_loads_zones_first() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("Statewide");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("ADAMS FVE 20170102.txt"), "001\tMR\tMILLER\n").unwrap();
        fs::write(dir.join("BUCKS FVE 20170102.txt"), "002\t\tSMITH\n").unwrap();
        fs::write(
            dir.join("ADAMS Zone Types 20170102.txt"),
            "ADAMS\t2\tW\tPrecinct\nADAMS\t5\tSD\tSchool District\n",
        )
        .unwrap();

        let preparer = StatePreparer::new(StateCode::Pa, temp_dir.path(), Some(dir.as_path())).unwrap();
        assert_eq!(preparer.files().len(), 2);

        let zones = preparer.options().zone_columns.clone().unwrap();
        assert_eq!(zones.column("ADAMS", Zone::Precinct), 2);
        assert_eq!(zones.column("ADAMS", Zone::SchoolBoard), 5);
        assert_eq!(zones.column("BUCKS", Zone::Precinct), 1);

        let rows: Vec<_> = preparer.rows().collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row.get("LAST_NAME"), "MILLER");
        assert_eq!(rows[1].row.get("STATE_VOTER_REF"), "002");
        assert_eq!(rows[1].row.get("COUNTYCODE"), "");
    }
}
