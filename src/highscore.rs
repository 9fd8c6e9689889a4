use std::io::ErrorKind;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The best score achieved so far, optionally persisted to a file as a single
/// decimal integer
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HighScore {
    best: u32,
    path: Option<PathBuf>,
}

impl HighScore {
    /// Load the high score stored at `path`.  A missing file counts as a high
    /// score of zero.  Failures are logged and also treated as zero so that
    /// the game can carry on without persistence.  If `path` is `None`,
    /// nothing is read or written.
    pub(crate) fn load(path: Option<PathBuf>) -> HighScore {
        let best = match path.as_deref().map(read_high_score) {
            Some(Ok(best)) => best,
            Some(Err(e)) => {
                tracing::warn!(error = ?e, "Could not read high score; starting from zero");
                0
            }
            None => 0,
        };
        HighScore { best, path }
    }

    pub(crate) fn best(&self) -> u32 {
        self.best
    }

    /// Record the final score of a session.  If it beats the current high
    /// score, the new value is stored and `true` is returned.
    pub(crate) fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        tracing::info!(score, previous = self.best, "New high score");
        self.best = score;
        if let Some(ref path) = self.path {
            if let Err(e) = write_high_score(path, score) {
                tracing::warn!(error = ?e, "Could not save high score");
            }
        }
        true
    }
}

fn read_high_score(path: &Path) -> Result<u32, LoadError> {
    match fs_err::read_to_string(path) {
        Ok(src) => src.trim().parse::<u32>().map_err(LoadError::Parse),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
        Err(e) => Err(LoadError::Read(e)),
    }
}

fn write_high_score(path: &Path, score: u32) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(SaveError::Mkdir)?;
    }
    fs_err::write(path, format!("{score}\n")).map_err(SaveError::Write)
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("high score file does not contain a valid score")]
    Parse(#[source] ParseIntError),
}

#[derive(Debug, Error)]
pub(crate) enum SaveError {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}
