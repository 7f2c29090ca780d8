// crates/mojifix-core/src/normalize.rs
//
// The encoding normalizer: trial decode, rewrite as UTF-8 with LF line
// endings, HTML repair, then the stylesheet patch.

use std::path::{Path, PathBuf};

use crate::config::NormalizeConfig;
use crate::css::{self, PatchOutcome};
use crate::encoding::{self, Candidate, Detection};
use crate::error::{FixError, Result};
use crate::html::HtmlPatcher;
use crate::targets;
use crate::text_norm;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileKind {
    Html,
    Script,
    Stylesheet,
    Other,
}

impl FileKind {
    pub fn of(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("html") | Some("htm") => FileKind::Html,
            Some("js") => FileKind::Script,
            Some("css") => FileKind::Stylesheet,
            _ => FileKind::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NormalizedBytes {
    Rewritten { encoding: Candidate, bytes: Vec<u8> },
    Undecodable { tried: Vec<Candidate> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Rewritten { encoding: Candidate },
    /// No candidate decoded the file; it was left untouched.
    Undecodable { tried: Vec<Candidate> },
}

/// Progress events, emitted in processing order.
#[derive(Debug)]
pub enum Event<'a> {
    Targeting { count: usize },
    Skipped { path: &'a Path },
    Decoded { path: &'a Path, encoding: Candidate },
    Fixed { path: &'a Path },
    Undecodable { path: &'a Path },
    Failed { path: &'a Path, error: &'a FixError },
    StylesheetPatched { path: &'a Path },
    StylesheetFailed { path: &'a Path, error: &'a FixError },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub targeted: usize,
    pub rewritten: usize,
    pub undecodable: usize,
    pub failed: usize,
    pub skipped: usize,
    pub stylesheet: Option<PatchOutcome>,
}

pub fn normalize_text(kind: FileKind, text: &str, patcher: &HtmlPatcher) -> String {
    let text = text_norm::normalize_newlines(text_norm::strip_bom(text));
    match kind {
        FileKind::Html => patcher.patch(&text),
        _ => text,
    }
}

pub fn normalize_bytes(
    kind: FileKind,
    raw: &[u8],
    candidates: &[Candidate],
    patcher: &HtmlPatcher,
) -> NormalizedBytes {
    match encoding::detect(raw, candidates) {
        Detection::Decoded { encoding, text } => NormalizedBytes::Rewritten {
            encoding,
            bytes: normalize_text(kind, &text, patcher).into_bytes(),
        },
        Detection::Exhausted { tried } => NormalizedBytes::Undecodable { tried },
    }
}

pub struct Normalizer {
    cfg: NormalizeConfig,
    patcher: HtmlPatcher,
}

impl Normalizer {
    pub fn new(cfg: NormalizeConfig) -> Result<Self> {
        Ok(Self {
            cfg,
            patcher: HtmlPatcher::new()?,
        })
    }

    pub fn normalize_file(&self, path: &Path) -> Result<FileOutcome> {
        self.normalize_file_with(path, &mut |_: &Event<'_>| {})
    }

    /// Like `normalize_file`, reporting the decode before the write so a
    /// failed write still shows which encoding was picked.
    pub fn normalize_file_with(
        &self,
        path: &Path,
        progress: &mut dyn FnMut(&Event<'_>),
    ) -> Result<FileOutcome> {
        let raw = std::fs::read(path).map_err(|e| FixError::io(path, e))?;

        match normalize_bytes(FileKind::of(path), &raw, &self.cfg.candidates, &self.patcher) {
            NormalizedBytes::Rewritten { encoding, bytes } => {
                progress(&Event::Decoded { path, encoding });
                std::fs::write(path, bytes).map_err(|e| FixError::io(path, e))?;
                progress(&Event::Fixed { path });
                Ok(FileOutcome::Rewritten { encoding })
            }
            NormalizedBytes::Undecodable { tried } => {
                tracing::warn!(path = %path.display(), tried = tried.len(), "no candidate decoded file");
                progress(&Event::Undecodable { path });
                Ok(FileOutcome::Undecodable { tried })
            }
        }
    }

    /// One full pass. Per-file failures are reported and counted; the batch
    /// always runs to the end. Only setup failures return `Err`.
    pub fn run(&self, progress: &mut dyn FnMut(&Event<'_>)) -> Result<NormalizeSummary> {
        self.cfg.validate()?;
        let targets: Vec<PathBuf> = targets::collect_targets(&self.cfg)?;

        let mut sum = NormalizeSummary {
            targeted: targets.len(),
            ..Default::default()
        };
        progress(&Event::Targeting { count: targets.len() });

        for path in targets.iter().map(PathBuf::as_path) {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "target missing, skipped");
                sum.skipped += 1;
                progress(&Event::Skipped { path });
                continue;
            }
            match self.normalize_file_with(path, progress) {
                Ok(FileOutcome::Rewritten { .. }) => sum.rewritten += 1,
                Ok(FileOutcome::Undecodable { .. }) => sum.undecodable += 1,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "normalize failed");
                    sum.failed += 1;
                    progress(&Event::Failed { path, error: &error });
                }
            }
        }

        if self.cfg.patch_stylesheet {
            let path = self.cfg.stylesheet_path();
            match css::patch_stylesheet(&path) {
                Ok(outcome) => {
                    if outcome == PatchOutcome::Appended {
                        progress(&Event::StylesheetPatched { path: path.as_path() });
                    }
                    sum.stylesheet = Some(outcome);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "stylesheet patch failed");
                    progress(&Event::StylesheetFailed {
                        path: path.as_path(),
                        error: &error,
                    });
                }
            }
        }

        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patcher() -> HtmlPatcher {
        HtmlPatcher::new().unwrap()
    }

    #[test]
    fn file_kind_by_extension() {
        assert_eq!(FileKind::of(Path::new("a/index.HTML")), FileKind::Html);
        assert_eq!(FileKind::of(Path::new("pages/home.js")), FileKind::Script);
        assert_eq!(FileKind::of(Path::new("style.css")), FileKind::Stylesheet);
        assert_eq!(FileKind::of(Path::new("README")), FileKind::Other);
    }

    #[test]
    fn scripts_get_newlines_and_bom_fixed_but_no_html_repair() {
        let out = normalize_text(FileKind::Script, "\u{feff}let a = 1;\r\nlet b = 2;\r", &patcher());
        assert_eq!(out, "let a = 1;\nlet b = 2;\n");
    }

    #[test]
    fn utf16be_with_bom_rewrites_without_bom() {
        let raw = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0xE9];
        let got = normalize_bytes(FileKind::Script, &raw, &encoding::DEFAULT_ORDER, &patcher());
        assert_eq!(
            got,
            NormalizedBytes::Rewritten {
                encoding: Candidate::Utf16Be,
                bytes: "A\u{e9}".as_bytes().to_vec(),
            }
        );
    }

    #[test]
    fn html_text_gets_doctype_and_meta() {
        let out = normalize_text(FileKind::Html, "<html><head></head><body>x</body></html>", &patcher());
        assert!(out.starts_with("<!DOCTYPE html>\n"));
        assert!(out.contains("<head>\n  <meta charset=\"UTF-8\"></head>"));
    }

    #[test]
    fn undecodable_bytes_are_reported_with_tried_list() {
        let got = normalize_bytes(FileKind::Html, b"ab\xff", &encoding::DEFAULT_ORDER, &patcher());
        assert_eq!(
            got,
            NormalizedBytes::Undecodable {
                tried: encoding::DEFAULT_ORDER.to_vec()
            }
        );
    }
}
