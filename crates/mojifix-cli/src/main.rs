// crates/mojifix-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "mojifix-cli")]
#[command(about = "Repair mojibake in static site assets by re-saving them as UTF-8", long_about = None)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trial-decode html/js/css assets, rewrite as UTF-8 and patch the stylesheet
    Normalize(cmd::normalize::NormalizeArgs),

    /// Re-save every html file in one directory from a single legacy encoding
    Reencode(cmd::reencode::ReencodeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    io::logging::init(cli.verbose)?;

    match cli.cmd {
        Commands::Normalize(args) => cmd::normalize::run(args),
        Commands::Reencode(args) => cmd::reencode::run(args),
    }
}
