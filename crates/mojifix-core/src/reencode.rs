// crates/mojifix-core/src/reencode.rs
//
// Bulk re-encoder: every html file directly inside one directory is decoded
// with a single legacy encoding and saved back as UTF-8. No fallback list,
// no newline or structural changes.

use std::path::{Path, PathBuf};

use crate::config::ReencodeConfig;
use crate::encoding::Candidate;
use crate::error::{FixError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReencodeOutcome {
    Fixed,
    /// The bytes are not valid in the configured encoding; file untouched.
    Undecodable { encoding: Candidate },
}

#[derive(Debug)]
pub enum ReencodeEvent<'a> {
    Fixed { path: &'a Path },
    Undecodable { path: &'a Path, encoding: Candidate },
    Failed { path: &'a Path, error: &'a FixError },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReencodeSummary {
    pub seen: usize,
    pub fixed: usize,
    pub failed: usize,
}

/// Files directly inside `dir` whose name ends in `.html`, any case.
pub fn list_html(dir: &Path) -> Result<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir).map_err(|e| FixError::io(dir, e))?;
    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.map_err(|e| FixError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(".html") && entry.path().is_file() {
            out.push(entry.path());
        }
    }
    out.sort();
    Ok(out)
}

pub fn reencode_file(path: &Path, encoding: Candidate) -> Result<ReencodeOutcome> {
    let raw = std::fs::read(path).map_err(|e| FixError::io(path, e))?;
    let Some(text) = encoding.decode(&raw) else {
        return Ok(ReencodeOutcome::Undecodable { encoding });
    };
    std::fs::write(path, text).map_err(|e| FixError::io(path, e))?;
    Ok(ReencodeOutcome::Fixed)
}

pub struct Reencoder {
    cfg: ReencodeConfig,
}

impl Reencoder {
    pub fn new(cfg: ReencodeConfig) -> Self {
        Self { cfg }
    }

    pub fn run(&self, progress: &mut dyn FnMut(&ReencodeEvent<'_>)) -> Result<ReencodeSummary> {
        self.cfg.validate()?;
        let files = list_html(&self.cfg.dir)?;
        tracing::debug!(dir = %self.cfg.dir.display(), files = files.len(), encoding = %self.cfg.encoding, "re-encode pass");

        let mut sum = ReencodeSummary {
            seen: files.len(),
            ..Default::default()
        };
        for path in files.iter().map(PathBuf::as_path) {
            match reencode_file(path, self.cfg.encoding) {
                Ok(ReencodeOutcome::Fixed) => {
                    sum.fixed += 1;
                    progress(&ReencodeEvent::Fixed { path });
                }
                Ok(ReencodeOutcome::Undecodable { encoding }) => {
                    tracing::warn!(path = %path.display(), %encoding, "not decodable");
                    sum.failed += 1;
                    progress(&ReencodeEvent::Undecodable { path, encoding });
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "re-encode failed");
                    sum.failed += 1;
                    progress(&ReencodeEvent::Failed { path, error: &error });
                }
            }
        }
        Ok(sum)
    }
}
