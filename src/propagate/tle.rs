use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sgp4::Elements;

use crate::propagate::PropagationError;

/// Split a raw TLE string into (optional name, line 1, line 2).
pub fn parse_tle_lines(tle: &str) -> Result<(Option<String>, String, String), PropagationError> {
    let lines: Vec<String> = tle
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    match lines.len() {
        2 => Ok((None, lines[0].clone(), lines[1].clone())),
        3 => Ok((Some(lines[0].clone()), lines[1].clone(), lines[2].clone())),
        _ => Err(PropagationError::InvalidTleFormat),
    }
}

pub struct TleEntry {
    pub name: String,
    pub norad_id: u64,
    pub source: String,
    pub elements: Elements,
}

/// Explicit cache of parsed TLE sets, keyed by NORAD id.
///
/// The cache is filled only by `load` / `reload`; nothing here watches the
/// filesystem or refetches behind the caller's back.
pub struct TleStore {
    path: PathBuf,
    satellites: HashMap<u64, TleEntry>,
}

impl TleStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            satellites: HashMap::new(),
        }
    }

    /// Parse the configured file, or every `.tle`/`.txt` file in the
    /// configured directory. A file that fails to parse is skipped with a
    /// warning; a missing path is an error.
    pub fn load(&mut self) -> Result<(), PropagationError> {
        if !self.path.exists() {
            return Err(PropagationError::PathNotFound(
                self.path.display().to_string(),
            ));
        }

        self.satellites.clear();

        if self.path.is_file() {
            for entry in parse_tle_file(&self.path)? {
                self.satellites.insert(entry.norad_id, entry);
            }
            return Ok(());
        }

        for dir_entry in fs::read_dir(&self.path)? {
            let path = dir_entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_tle = path
                .extension()
                .map(|ext| ext == "tle" || ext == "txt")
                .unwrap_or(false);
            if !is_tle {
                continue;
            }
            match parse_tle_file(&path) {
                Ok(entries) => {
                    for entry in entries {
                        self.satellites.insert(entry.norad_id, entry);
                    }
                }
                Err(e) => {
                    log::warn!("skipping TLE file {}: {}", path.display(), e);
                }
            }
        }

        Ok(())
    }

    /// Drop the cached sets and re-read them from disk.
    pub fn reload(&mut self) -> Result<(), PropagationError> {
        self.load()
    }

    pub fn satellites(&self) -> Vec<&TleEntry> {
        let mut entries: Vec<_> = self.satellites.values().collect();
        entries.sort_by_key(|e| e.norad_id);
        entries
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    /// Remove and return one satellite's entry.
    pub fn take(&mut self, norad_id: u64) -> Result<TleEntry, PropagationError> {
        self.satellites
            .remove(&norad_id)
            .ok_or(PropagationError::UnknownSatellite(norad_id))
    }

    /// When exactly one satellite is loaded, remove and return it.
    pub fn take_single(&mut self) -> Option<TleEntry> {
        if self.satellites.len() != 1 {
            return None;
        }
        let id = *self.satellites.keys().next()?;
        self.satellites.remove(&id)
    }
}

/// Parse one TLE file, which may hold several satellites.
fn parse_tle_file(path: &Path) -> Result<Vec<TleEntry>, PropagationError> {
    let content = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let mut results = Vec::new();
    for (name, line1, line2) in split_multi_tle(&content) {
        let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
            .map_err(|e| PropagationError::InvalidTle {
                file: filename.clone(),
                message: e.to_string(),
            })?;

        results.push(TleEntry {
            name: name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id)),
            norad_id: elements.norad_id,
            source: filename.clone(),
            elements,
        });
    }

    Ok(results)
}

/// Group the lines of a multi-satellite TLE file into 2-line and 3-line sets.
fn split_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            result.push((
                Some(lines[i].to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}
