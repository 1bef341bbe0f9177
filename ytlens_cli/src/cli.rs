use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ytlens")]
#[command(about = "ytlens - YouTube search, video details and transcripts")]
#[command(version)]
#[command(after_help = "\x1b[1;36mExamples:\x1b[0m
  ytlens search \"rust tutorial\"                     Top five results
  ytlens search \"rust tutorial\" --limit 10          Up to ten results
  ytlens info dQw4w9WgXcQ                           Details for a video ID
  ytlens info https://youtu.be/dQw4w9WgXcQ          ...or any video URL
  ytlens transcript dQw4w9WgXcQ --output text       One [time] text line per cue

\x1b[1;36mConfiguration:\x1b[0m
  Settings are read from --config, or from ytlens/config.toml in the user
  config directory when present.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "YTLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Search YouTube videos
    #[command(after_help = "\x1b[1;36mExamples:\x1b[0m
  ytlens search \"rust async\"
  ytlens search \"lofi beats\" --limit 3 --output json")]
    Search {
        /// Search query
        #[arg(value_parser = non_blank)]
        query: String,
        /// Maximum number of results (1-10)
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        limit: u8,
    },

    /// Show title, description, views and channel of a video
    #[command(visible_alias = "get")]
    Info {
        /// Video ID or youtube.com / youtu.be URL
        #[arg(value_parser = non_blank)]
        input: String,
    },

    /// Fetch the timed transcript of a video
    Transcript {
        /// Video ID or youtube.com / youtu.be URL
        #[arg(value_parser = non_blank)]
        input: String,
    },
}

/// Trimmed argument; whitespace-only values are rejected.
fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Plain text output
    Text,
}
