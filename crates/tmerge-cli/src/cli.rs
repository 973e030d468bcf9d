use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tmerge",
    about = "Transcript merge — align two near-duplicate transcripts and merge them",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Strip transcript markup from a file
    Clean(CleanArgs),
    /// Show the line alignment between two transcripts
    Diff(DiffArgs),
    /// Merge two transcripts into one document
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct CleanArgs {
    /// Transcript file to normalize
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Document A (e.g. the clean transcript)
    pub file_a: PathBuf,
    /// Document B (e.g. the annotated transcript)
    pub file_b: PathBuf,
    /// Compare raw line text instead of normalized forms
    #[arg(long)]
    pub raw: bool,
    /// Show normalized text in the cards instead of the raw lines
    #[arg(long)]
    pub cleaned: bool,
    /// Include unchanged lines in the output
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Document A (e.g. the clean transcript)
    pub file_a: PathBuf,
    /// Document B (e.g. the annotated transcript)
    pub file_b: PathBuf,
    /// JSON choices file mapping change index to left/right/manual text
    #[arg(long)]
    pub choices: Option<PathBuf>,
    /// Blanket preference for changes not covered by the choices file
    #[arg(long)]
    pub prefer: Option<Prefer>,
    /// Compare raw line text instead of normalized forms
    #[arg(long)]
    pub raw: bool,
    /// Write the merged document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Prefer {
    Left,
    Right,
}
