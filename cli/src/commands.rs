//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for lisa
#[derive(Parser, Debug)]
#[command(name = "lisa")]
#[command(author, version, about = "Assistant runtime - lets a language model call scoped tools")]
#[command(long_about = r#"
Lisa sends a prompt to a language model together with the tools the session
is allowed to use, runs the tools the model asks for, and returns the model's
final answer.

Tools are hidden from the model until their scopes are granted:
  current_time   requires read:clock
  word_count     requires read:text

Configuration files are loaded from (in priority order):
1. LISA_* env vars     e.g. LISA_PROVIDER__MODEL=gpt-4o
2. --config <path>     Explicit config file
3. ./lisa.toml         Project-level config
4. ~/.config/lisa/config.toml   Global config

Example:
  lisa --grant read:clock "What time is it in UTC?"
  lisa --provider anthropic --grant read:text "How many words are in 'to be or not to be'?"
"#)]
pub struct Cli {
    /// The request to send to the model
    pub prompt: Option<String>,

    /// Provider family (openai, anthropic)
    #[arg(short, long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Model id (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Grant a scope to this session (can be specified multiple times)
    #[arg(short, long = "grant", value_name = "SCOPE")]
    pub grants: Vec<String>,

    /// Maximum number of tool rounds
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// System prompt (overrides config)
    #[arg(long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
