use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use histsed::ReplacerConfig;

#[derive(Parser)]
#[command(name = "histsed")]
#[command(about = "Replay a chat transcript and apply a sed-style correction to it")]
#[command(long_about = "histsed replays a chat transcript and runs one history
correction against it, exactly as a chat bot would when a user types a
s/pattern/replacement/ line.

TRANSCRIPT FORMAT (oldest line first, one message per line):
  <nick> some text          a normal message
  * nick waves              an action
  -nick- some text          a notice

EXAMPLES:
  histsed 's/teh/the/' transcript.txt
  histsed --nick alice 'bob: s/foo/bar/g' transcript.txt
  cat transcript.txt | histsed 's/foo/bar/i'
  histsed --show-errors 's/(/x/' transcript.txt")]
#[command(version)]
pub struct Cli {
    /// Correction expression (e.g. 's/teh/the/', 'bob: s/foo/bar/g')
    #[arg(value_name = "EXPRESSION")]
    pub expression: String,

    /// Transcript file to replay; stdin when omitted
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: Option<PathBuf>,

    /// Nick of the user issuing the correction
    #[arg(long, default_value = "you")]
    pub nick: String,

    /// Channel the transcript belongs to
    #[arg(long, default_value = "#demo")]
    pub channel: String,

    /// TOML config file (see ReplacerConfig)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Surface errors and not-found notices instead of staying silent
    #[arg(long)]
    pub show_errors: bool,

    /// Disable bold markers around the replacement text
    #[arg(long)]
    pub no_bold: bool,

    /// Regex time budget in milliseconds (0 = unbounded)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

impl Cli {
    /// Resolve the effective config: file values first, flag overrides on
    /// top.
    pub fn load_config(&self) -> Result<ReplacerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file: {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file: {}", path.display()))?
            }
            None => ReplacerConfig::default(),
        };

        if self.show_errors {
            config.display_errors = true;
        }
        if self.no_bold {
            config.bold_replacement_text = false;
        }
        if let Some(ms) = self.timeout_ms {
            config.process_timeout_ms = ms;
        }
        Ok(config)
    }
}
