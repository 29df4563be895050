use std::io::{self, Read};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use log::warn;

use cueplay::parser::{self, ParseOutcome};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Inspect SRT subtitles and query the active cue at a given time")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "TIME",
        help = "Print the cue active at the given time (HH:MM:SS,mmm, or plain milliseconds). May be repeated."
    )]
    at: Vec<String>,
    #[arg(short, long, help = "List all parsed cues in playback order.")]
    list: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    let parsed = parser::parse(&data);
    match parsed.outcome {
        ParseOutcome::Empty => {
            return Err(anyhow!("No cues found in '{}'.", cli.input));
        }
        ParseOutcome::Partial => {
            warn!("'{}' contained lines that could not be parsed", cli.input);
        }
        ParseOutcome::Parsed => (),
    }

    println!("{} cues", parsed.track.len());

    if cli.list {
        for cue in parsed.track.cues() {
            println!(
                "{:>4}  {} --> {}  {}",
                cue.sequence_number,
                format_timestamp(cue.show_at),
                format_timestamp(cue.hide_at),
                cue.text.replace('\n', " / ")
            );
        }
    }

    for query in &cli.at {
        let time = parse_query_time(query)?;
        match parsed.track.text_at(time) {
            Some(text) => println!("{}  {}", format_timestamp(time), text.replace('\n', " / ")),
            None => println!("{}  (no cue)", format_timestamp(time)),
        }
    }

    Ok(())
}

fn parse_query_time(query: &str) -> Result<Duration> {
    let query = query.trim();
    if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
        let millis: u64 = query
            .parse()
            .context(format!("Invalid time query: '{}'", query))?;
        return Ok(Duration::from_millis(millis));
    }
    parser::parse_timestamp(query)
        .ok_or_else(|| anyhow!("Invalid time query: '{}' (expected HH:MM:SS,mmm)", query))
}

fn format_timestamp(timestamp: Duration) -> String {
    let total_secs = timestamp.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = timestamp.subsec_millis();
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
