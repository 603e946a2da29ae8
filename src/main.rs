mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use histsed::format::action;
use histsed::{HistoryMessage, HostAction, MessageKind, invoke};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;

    let raw = match &cli.transcript {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transcript from stdin")?;
            buf
        }
    };

    // Oldest-first on disk, newest-first for the search.
    let mut history: Vec<HistoryMessage> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_transcript_line(line, &cli.channel))
        .collect::<Result<_>>()?;
    history.reverse();

    let trigger = HistoryMessage::new(MessageKind::Privmsg, &cli.channel, &cli.nick, &cli.expression);

    match invoke(&trigger, history.iter(), &histsed::DefaultHost, &config) {
        HostAction::Reply(reply) => println!("{reply}"),
        HostAction::ErrorNotice(text) => println!("error: {text}"),
        HostAction::InfoNotice(text) => println!("{text}"),
        HostAction::Silent => {}
    }

    Ok(())
}

/// One transcript line: `<nick> text`, `* nick action text`, or
/// `-nick- notice text`.
fn parse_transcript_line(line: &str, channel: &str) -> Result<HistoryMessage> {
    if let Some(rest) = line.strip_prefix('<') {
        let (nick, text) = rest
            .split_once("> ")
            .with_context(|| format!("malformed message line: {line:?}"))?;
        return Ok(HistoryMessage::new(MessageKind::Privmsg, channel, nick, text));
    }
    if let Some(rest) = line.strip_prefix("* ") {
        let (nick, text) = rest
            .split_once(' ')
            .with_context(|| format!("malformed action line: {line:?}"))?;
        return Ok(HistoryMessage::new(MessageKind::Privmsg, channel, nick, &action(text)));
    }
    if let Some(rest) = line.strip_prefix('-') {
        let (nick, text) = rest
            .split_once("- ")
            .with_context(|| format!("malformed notice line: {line:?}"))?;
        return Ok(HistoryMessage::new(MessageKind::Notice, channel, nick, text));
    }
    anyhow::bail!("unrecognized transcript line: {line:?}");
}
