// crates/mojifix-cli/src/cmd/normalize.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mojifix_core::css::PatchOutcome;
use mojifix_core::encoding::parse_candidates;
use mojifix_core::normalize::Event;
use mojifix_core::{NormalizeConfig, Normalizer};

use crate::io::status;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Site root: html files directly inside it are processed
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Subtree (relative to root) scanned recursively for .js files
    #[arg(long, default_value = "pages")]
    pub pages: PathBuf,

    /// Stylesheet to normalize and to append the layout patch to
    #[arg(long, default_value = "style.css")]
    pub stylesheet: PathBuf,

    /// Extra script outside the pages subtree (repeatable)
    #[arg(long = "script", default_value = "script.js")]
    pub scripts: Vec<PathBuf>,

    /// Comma separated candidate encodings, tried in order; first success wins.
    ///
    /// Default: utf-16-be,utf-16-le,utf-16,utf-8-sig,utf-8,cp949,euc-kr
    #[arg(long)]
    pub candidates: Option<String>,

    /// Skip the stylesheet layout patch
    #[arg(long, default_value_t = false)]
    pub no_css_patch: bool,
}

pub fn run(args: NormalizeArgs) -> anyhow::Result<()> {
    let mut cfg = NormalizeConfig {
        root: args.root,
        pages_dir: args.pages,
        stylesheet: args.stylesheet,
        scripts: args.scripts,
        patch_stylesheet: !args.no_css_patch,
        ..Default::default()
    };
    if let Some(list) = args.candidates.as_deref() {
        cfg.candidates = parse_candidates(list).context("parse --candidates")?;
    }

    tracing::debug!(?cfg, "normalize config");

    let root = cfg.root.clone();
    let normalizer = Normalizer::new(cfg)?;
    let sum = normalizer
        .run(&mut |ev: &Event<'_>| {
            if let Some(line) = status::normalize_line(&root, ev) {
                println!("{line}");
            }
        })
        .with_context(|| format!("normalize {}", root.display()))?;

    let css = match sum.stylesheet {
        Some(PatchOutcome::Appended) => "appended",
        Some(PatchOutcome::AlreadyPresent) => "present",
        Some(PatchOutcome::Missing) => "missing",
        None => "off",
    };
    eprintln!(
        "normalize done: targeted={} rewritten={} undecodable={} failed={} skipped={} css_patch={}",
        sum.targeted, sum.rewritten, sum.undecodable, sum.failed, sum.skipped, css
    );

    Ok(())
}
