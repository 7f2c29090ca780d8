// crates/mojifix-cli/src/cmd/reencode.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mojifix_core::reencode::ReencodeEvent;
use mojifix_core::{Candidate, ReencodeConfig, Reencoder};

use crate::io::status;

#[derive(Args, Debug)]
pub struct ReencodeArgs {
    /// Directory whose .html files (not recursive) are re-saved as UTF-8
    #[arg(long, env = "MOJIFIX_REENCODE_DIR")]
    pub dir: PathBuf,

    /// The single legacy encoding the files are assumed to be in
    #[arg(long, default_value_t = ReencodeConfig::DEFAULT_ENCODING.to_string())]
    pub encoding: String,
}

pub fn run(args: ReencodeArgs) -> anyhow::Result<()> {
    let encoding: Candidate = args
        .encoding
        .parse()
        .with_context(|| format!("parse --encoding {}", args.encoding))?;

    let cfg = ReencodeConfig {
        dir: args.dir,
        encoding,
    };
    tracing::debug!(?cfg, "reencode config");
    let dir = cfg.dir.clone();

    let sum = Reencoder::new(cfg)
        .run(&mut |ev: &ReencodeEvent<'_>| println!("{}", status::reencode_line(ev)))
        .with_context(|| format!("reencode {}", dir.display()))?;

    println!("Total fixed: {}", sum.fixed);
    eprintln!(
        "reencode done: dir={} encoding={} seen={} fixed={} failed={}",
        dir.display(),
        encoding,
        sum.seen,
        sum.fixed,
        sum.failed
    );
    Ok(())
}
