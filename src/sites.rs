//! # Site Config Store
//!
//! Loads harmonic constants for one tide site at a time from a flat text resource.
//!
//! ## Resource Format
//! One record per line, comma separated:
//! ```text
//! <name>,<offsetSeconds>,<lowFractionPercent>,<s1>,<c1>,...,<s7>,<c7>,<errorSeconds>
//! ```
//! Lines whose first field starts with `#` are comments; blank lines are ignored as well.
//! Site selection is cyclic: asking for an index past the last record wraps back to the first.

use crate::error::TideError;
use crate::harmonics::{constituents, Constituent, CONSTITUENT_COUNT};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Marker that turns a record into a comment.
const COMMENT: char = '#';

/// Fields per record: name, offset, low fraction, 7 amplitude pairs, error.
const FIELD_COUNT: usize = 3 + 2 * CONSTITUENT_COUNT + 1;

/// Harmonic parameters for a single tide site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Unique key within a resource
    pub name: String,
    /// Phase of the dominant tide relative to the model epoch, in seconds
    pub offset: i64,
    /// Position of low water between consecutive highs (0.0 - 1.0)
    pub low_fraction: f64,
    /// Declared accuracy of the model for this site, in seconds
    pub error: i64,
    /// Timing perturbation terms, one per constituent period
    pub harmonics: [Constituent; CONSTITUENT_COUNT],
}

/// Parse a single non-comment record.
pub fn parse_record(line: &str) -> Result<Site, TideError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(TideError::Configuration(format!(
            "expected {FIELD_COUNT} fields, found {}: {line:?}",
            fields.len()
        )));
    }

    let name = fields[0];
    if name.is_empty() {
        return Err(TideError::Configuration(format!("record without a site name: {line:?}")));
    }

    let int = |idx: usize| -> Result<i64, TideError> {
        fields[idx].parse().map_err(|_| {
            TideError::Configuration(format!("{name}: field {} is not an integer: {:?}", idx + 1, fields[idx]))
        })
    };
    let float = |idx: usize| -> Result<f64, TideError> {
        fields[idx].parse().map_err(|_| {
            TideError::Configuration(format!("{name}: field {} is not a number: {:?}", idx + 1, fields[idx]))
        })
    };

    let mut amplitudes = [(0.0, 0.0); CONSTITUENT_COUNT];
    for (i, pair) in amplitudes.iter_mut().enumerate() {
        *pair = (float(3 + 2 * i)?, float(4 + 2 * i)?);
    }

    Ok(Site {
        name: name.to_string(),
        offset: int(1)?,
        low_fraction: int(2)? as f64 / 100.0,
        error: int(FIELD_COUNT - 1)?,
        harmonics: constituents(amplitudes),
    })
}

fn is_record(line: &str) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(COMMENT)
}

/// Select the `index`-th record from `reader`, wrapping to the first record when `index` is past
/// the end. Returns the index actually used together with the parsed site.
pub fn load_from_reader<R: BufRead>(reader: R, index: usize) -> Result<(usize, Site), TideError> {
    let mut first = None;
    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        if !is_record(&line) {
            continue;
        }
        if count == index {
            return Ok((index, parse_record(&line)?));
        }
        if first.is_none() {
            first = Some(line);
        }
        count += 1;
    }

    match first {
        Some(line) => {
            debug!("site index {index} past {count} records, wrapping to first");
            Ok((0, parse_record(&line)?))
        }
        None => Err(TideError::Configuration("site resource has no records".to_string())),
    }
}

/// Select the record named `name` from `reader`, returning its index and the parsed site.
pub fn find_in_reader<R: BufRead>(reader: R, name: &str) -> Result<(usize, Site), TideError> {
    let mut index = 0;
    for line in reader.lines() {
        let line = line?;
        if !is_record(&line) {
            continue;
        }
        if line.split(',').next().map(str::trim) == Some(name) {
            return Ok((index, parse_record(&line)?));
        }
        index += 1;
    }
    Err(TideError::Configuration(format!("no site named {name:?}")))
}

/// Cyclic cursor over the sites of a resource file.
///
/// The current site is immutable until the next [`SiteStore::advance`] or reload.
#[derive(Debug)]
pub struct SiteStore {
    path: PathBuf,
    index: usize,
    current: Site,
}

impl SiteStore {
    /// Open `path` and load the site at `index` (wrapping when past the end).
    pub fn open<P: AsRef<Path>>(path: P, index: usize) -> Result<Self, TideError> {
        let path = path.as_ref().to_path_buf();
        let (index, current) = Self::read(&path, index)?;
        info!("Loaded site {} (#{index}) from {}", current.name, path.display());
        Ok(SiteStore {
            path,
            index,
            current,
        })
    }

    /// Open `path` and load the site called `name`.
    pub fn open_named<P: AsRef<Path>>(path: P, name: &str) -> Result<Self, TideError> {
        let path = path.as_ref().to_path_buf();
        let (index, current) = find_in_reader(BufReader::new(File::open(&path)?), name)?;
        info!("Loaded site {} (#{index}) from {}", current.name, path.display());
        Ok(SiteStore {
            path,
            index,
            current,
        })
    }

    fn read(path: &Path, index: usize) -> Result<(usize, Site), TideError> {
        load_from_reader(BufReader::new(File::open(path)?), index)
    }

    /// Reload the record at `index` from the resource.
    pub fn load(&mut self, index: usize) -> Result<&Site, TideError> {
        let (index, site) = Self::read(&self.path, index)?;
        self.index = index;
        self.current = site;
        Ok(&self.current)
    }

    /// Resolve a site by name and make it current.
    pub fn load_named(&mut self, name: &str) -> Result<&Site, TideError> {
        let (index, site) = find_in_reader(BufReader::new(File::open(&self.path)?), name)?;
        self.index = index;
        self.current = site;
        Ok(&self.current)
    }

    /// Step to the next site, wrapping after the last record.
    pub fn advance(&mut self) -> Result<&Site, TideError> {
        self.load(self.index + 1)?;
        info!("Advanced to site {} (#{})", self.current.name, self.index);
        Ok(&self.current)
    }

    pub fn current(&self) -> &Site {
        &self.current
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
