use std::path::PathBuf;

use clap::Parser;

const AFTER_HELP: &str = "\
Examples:
  mousemover                        # Default: 30 second interval, 1 pixel movement
  mousemover --interval 60          # Move mouse every 60 seconds
  mousemover --distance 5 -v        # Move 5 pixels with verbose logging
  mousemover --config mover.json    # Load settings from a json file

Warning:
  Running this tool may violate your company's IT policies.
  Use at your own risk!";

/// A simple utility that moves your mouse periodically to prevent screen lock.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, disable_version_flag = true, after_help = AFTER_HELP)]
pub struct Args {
    /// Interval in seconds between mouse movements [default: 30]
    #[arg(short, long, allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// Distance in pixels to move the mouse [default: 1]
    #[arg(short, long, allow_negative_numbers = true)]
    pub distance: Option<i64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Load settings from a json file, flags given on the command line win
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
