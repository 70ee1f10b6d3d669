use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::CorpusError;

/// Marker inside a corpus line that becomes a line break in the tweet.
pub const DEFAULT_LINE_BREAK_MARKER: &str = "/ ";

/// Lines available for posting, read fresh from disk on every run.
#[derive(Debug, Clone)]
pub struct Corpus {
    path: PathBuf,
    lines: Vec<String>,
}

impl Corpus {
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CorpusError::NotFound {
                path: path.to_path_buf(),
            },
            _ => CorpusError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let text = String::from_utf8(bytes).map_err(|source| CorpusError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &text)
    }

    /// Splits `text` into entries. Blank lines are dropped so a trailing
    /// newline never produces an empty tweet.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, CorpusError> {
        let path = path.into();
        let lines: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        if lines.is_empty() {
            return Err(CorpusError::Empty { path });
        }

        Ok(Self { path, lines })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Picks one entry uniformly at random.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &str {
        &self.lines[rng.random_range(0..self.lines.len())]
    }

    /// Picks one entry and turns it into the text that gets posted.
    pub fn select_message<R: Rng>(&self, rng: &mut R, marker: &str) -> String {
        format_lyric(self.pick(rng), marker)
    }
}

/// Replaces every `marker` in `line` with a newline.
pub fn format_lyric(line: &str, marker: &str) -> String {
    if marker.is_empty() {
        return line.to_string();
    }
    line.replace(marker, "\n")
}
