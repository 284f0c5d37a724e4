//! CLI argument definitions for stormex

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stormex")]
#[command(about = "List and extract files from game-asset archive storage")]
#[command(version)]
pub struct Args {
    /// Directory where the game's data storage lives
    #[arg(short = 'i', long = "in")]
    pub input: PathBuf,

    /// Restrict results to full paths containing STRING
    #[arg(short, long, default_value = "/")]
    pub search: String,

    /// Restrict results to filenames containing STRING
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Restrict results to filenames having extension STRING
    #[arg(short = 't', long = "filetype")]
    pub filetype: Option<String>,

    /// Extract the files found
    #[arg(short = 'x', long)]
    pub extract: bool,

    /// Folder the files are extracted into (extract only)
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Preserve the path hierarchy found inside the storage (extract only)
    #[arg(short = 'p', long = "path")]
    pub full_path: bool,

    /// Convert extracted file paths to lowercase (extract only)
    #[arg(short = 'c', long)]
    pub lowercase: bool,

    /// Print the directories matches live in instead of the matches
    #[arg(short = 'd', long)]
    pub directories: bool,

    /// Streaming chunk size in bytes
    #[arg(long, default_value_t = stormex::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Print matches as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Print more information
    #[arg(short, long)]
    pub verbose: bool,

    /// Print nothing but per-entry failures
    #[arg(short, long)]
    pub quiet: bool,
}
