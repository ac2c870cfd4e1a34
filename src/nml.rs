use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NmlError {
    #[error("Failed to read namelist {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed namelist line {line} in {path}")]
    Parse { path: PathBuf, line: usize },
    #[error("Failed to write namelist {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An ordered Fortran namelist document.
///
/// Groups (`&name ... /`) hold `key = value` pairs; values are kept as raw
/// text so that untouched entries survive a read-patch-write cycle byte for
/// byte. Group and key lookups are case insensitive, as in Fortran.
#[derive(Debug, Clone, PartialEq)]
pub struct Namelist {
    groups: Vec<(String, Vec<(String, String)>)>,
}

impl Namelist {
    pub fn read(path: &Path) -> Result<Self, NmlError> {
        let text = fs::read_to_string(path).map_err(|source| NmlError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, NmlError> {
        let mut groups: Vec<(String, Vec<(String, String)>)> = Vec::new();
        let mut current: Option<(String, Vec<(String, String)>)> = None;

        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            let malformed = || NmlError::Parse {
                path: path.to_path_buf(),
                line: number + 1,
            };

            if let Some(name) = line.strip_prefix('&') {
                if current.is_some() {
                    // nested group start
                    return Err(malformed());
                }
                current = Some((name.trim().to_string(), Vec::new()));
            } else if line == "/" {
                groups.push(current.take().ok_or_else(malformed)?);
            } else {
                let (key, value) = line.split_once('=').ok_or_else(malformed)?;
                let entries = &mut current.as_mut().ok_or_else(malformed)?.1;

                entries.push((
                    key.trim().to_string(),
                    value.trim().trim_end_matches(',').trim().to_string(),
                ));
            }
        }

        Ok(Self { groups })
    }

    /// set `group / key` to `value`, appending the group or key if absent
    pub fn set(&mut self, group: &str, key: &str, value: impl ToString) {
        let value = value.to_string();

        let index = match self
            .groups
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(group))
        {
            Some(index) => index,
            None => {
                self.groups.push((group.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };
        let entries = &mut self.groups[index].1;

        match entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(key))
        {
            Some(index) => entries[index].1 = value,
            None => entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(group))
            .and_then(|(_, entries)| {
                entries
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
            })
            .map(|(_, value)| value.as_str())
    }

    /// write the document back, replacing whatever is at `path`
    pub fn write(&self, path: &Path) -> Result<(), NmlError> {
        let mut output = String::new();

        for (name, entries) in self.groups.iter() {
            output.push_str(&format!("&{name}\n"));
            for (key, value) in entries {
                output.push_str(&format!("    {key} = {value}\n"));
            }
            output.push_str("/\n");
        }

        fs::write(path, output).map_err(|source| NmlError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
