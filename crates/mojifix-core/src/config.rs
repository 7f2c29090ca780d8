// crates/mojifix-core/src/config.rs

use std::path::{Path, PathBuf};

use crate::encoding::{Candidate, DEFAULT_ORDER};
use crate::error::{FixError, Result};

/// Inputs for one normalize pass. Relative members resolve against `root`.
#[derive(Clone, Debug)]
pub struct NormalizeConfig {
    pub root: PathBuf,
    /// Subtree scanned recursively for scripts.
    pub pages_dir: PathBuf,
    pub stylesheet: PathBuf,
    /// Extra scripts outside the pages subtree.
    pub scripts: Vec<PathBuf>,
    pub candidates: Vec<Candidate>,
    /// Append the layout patch to the stylesheet after the file pass.
    pub patch_stylesheet: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            pages_dir: PathBuf::from("pages"),
            stylesheet: PathBuf::from("style.css"),
            scripts: vec![PathBuf::from("script.js")],
            candidates: DEFAULT_ORDER.to_vec(),
            patch_stylesheet: true,
        }
    }
}

impl NormalizeConfig {
    pub fn resolve(&self, p: &Path) -> PathBuf {
        self.root.join(p)
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.resolve(&self.stylesheet)
    }

    pub fn validate(&self) -> Result<()> {
        if self.candidates.is_empty() {
            return Err(FixError::Config("candidate list is empty".into()));
        }
        if !self.root.is_dir() {
            return Err(FixError::Config(format!(
                "root is not a directory: {}",
                self.root.display()
            )));
        }
        Ok(())
    }
}

/// Inputs for one re-encode pass. There is no default directory.
#[derive(Clone, Debug)]
pub struct ReencodeConfig {
    pub dir: PathBuf,
    pub encoding: Candidate,
}

impl ReencodeConfig {
    pub const DEFAULT_ENCODING: Candidate = Candidate::Cp949;

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            encoding: Self::DEFAULT_ENCODING,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(FixError::Config(format!(
                "re-encode dir is not a directory: {}",
                self.dir.display()
            )));
        }
        Ok(())
    }
}
