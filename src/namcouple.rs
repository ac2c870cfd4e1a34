use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// directive holding the coupling timestep, value on the following line
const TIMESTEP_DIRECTIVE: &str = "$CPL_PERIOD";

#[derive(Error, Debug)]
pub enum NamcoupleError {
    #[error("Failed to read coupling document {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Coupling document {path} has no {TIMESTEP_DIRECTIVE} directive")]
    MissingDirective { path: PathBuf },
    #[error("Failed to write coupling document {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The coupler's own configuration document.
///
/// A line oriented directive grammar: `$NAME` lines open a directive, the
/// following lines carry its values, `$END` closes it. Only the coupling
/// timestep directive is ever edited here; every other line passes through
/// untouched.
#[derive(Debug, Clone)]
pub struct Namcouple {
    path: PathBuf,
    lines: Vec<String>,
}

impl Namcouple {
    pub fn read(path: &Path) -> Result<Self, NamcoupleError> {
        let text = fs::read_to_string(path).map_err(|source| NamcoupleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            lines: text.lines().map(String::from).collect(),
        })
    }

    /// replace the value line of the coupling timestep directive
    pub fn set_coupling_timestep(&mut self, t_step: &str) -> Result<(), NamcoupleError> {
        let directive = self
            .lines
            .iter()
            .position(|line| line.trim().eq_ignore_ascii_case(TIMESTEP_DIRECTIVE))
            .ok_or_else(|| NamcoupleError::MissingDirective {
                path: self.path.clone(),
            })?;

        let value = format!(" {t_step}");
        match self.lines.get_mut(directive + 1) {
            Some(line) => *line = value,
            None => self.lines.push(value),
        }

        Ok(())
    }

    /// write the document back to where it was read from
    pub fn write(&self) -> Result<(), NamcoupleError> {
        let mut text = self.lines.join("\n");
        text.push('\n');

        fs::write(&self.path, text).map_err(|source| NamcoupleError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
