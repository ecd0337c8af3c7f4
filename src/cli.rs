use clap::Parser;

use crate::words::DEFAULT_TOPIC;

/// Gallows CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Topic to start with; unknown ids fall back to the default topic
    #[arg(short = 't', long = "topic", default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Path to a JSON word list ({"answer": "hint", ...}), loaded as the
    /// "custom" topic and selected at startup
    #[arg(short = 'i', long = "input")]
    pub word_list_path: Option<String>,

    /// Track a running score and levels across rounds
    #[arg(long = "scoring")]
    pub scoring: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}
