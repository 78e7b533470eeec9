//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert an image into ASCII art
#[derive(Parser, Debug)]
#[command(name = "ascii-converter")]
#[command(version, about = "Convert images to ASCII art text files", long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image to convert
    #[arg(short, long, required_unless_present = "config")]
    pub input: Option<PathBuf>,

    /// Text file to write (truncated if it exists)
    #[arg(short, long, required_unless_present = "config")]
    pub output: Option<PathBuf>,

    /// Target width in characters (0 = image width)
    #[arg(short = 'x', long, default_value = "0")]
    pub width: u32,

    /// Target height in characters (0 = image height, ignored unless --no-keep-ratio)
    #[arg(short = 'y', long, default_value = "0")]
    pub height: u32,

    /// Number of ramp symbols to use, 1-39 (0 = all)
    #[arg(short = 'n', long, default_value = "0")]
    pub symbols: u32,

    /// Use the given height instead of deriving it from the image aspect ratio
    #[arg(long)]
    pub no_keep_ratio: bool,

    /// Config file (line-oriented, or TOML with a .toml extension)
    #[arg(
        long,
        short,
        conflicts_with_all = ["input", "output", "width", "height", "symbols", "no_keep_ratio"]
    )]
    pub config: Option<PathBuf>,

    /// Print debug information
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the symbol ramp
    Ramp,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the params read from a config file
    Show {
        /// Config file path
        path: PathBuf,
    },
    /// Create a template config file
    Init {
        /// Config file path
        path: PathBuf,
    },
}
