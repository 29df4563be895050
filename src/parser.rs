use crate::srt::{Cue, CueTrack};

use std::time::Duration;

use log::{debug, warn};
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{space0, space1};
use nom::combinator::map_res;
use nom::error::VerboseError;
use nom::IResult;

type NomResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// How much of the input survived parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every block parsed cleanly.
    Parsed,
    /// At least one cue was recovered, but some lines or blocks were skipped.
    Partial,
    /// No cues found. Loaded but empty; the caller decides whether to treat
    /// this as a failure.
    Empty,
}

#[derive(Debug)]
pub struct Parsed {
    pub track: CueTrack,
    pub outcome: ParseOutcome,
}

/// Parser state, threaded through [`State::step`] one line at a time.
///
/// Malformed input never aborts the machine; it skips and resyncs on the next
/// thing that looks like the start of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Waiting for a bare integer line starting a block.
    ExpectIndex,
    /// Index seen, waiting for the `HH:MM:SS,mmm --> HH:MM:SS,mmm` line.
    ExpectTimeRange { sequence_number: u32 },
    /// Time range seen, accumulating text lines until a blank line.
    ExpectText {
        sequence_number: u32,
        show_at: Duration,
        hide_at: Duration,
        text: String,
    },
}

/// What a single step did, besides moving the machine.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// A blank line closed the current block.
    Emit(Cue),
    /// The line did not fit the grammar and was dropped.
    Skipped,
}

impl State {
    /// Consume one (already trimmed) line.
    pub fn step(self, line: &str) -> (State, Step) {
        match self {
            State::ExpectIndex => {
                if line.is_empty() {
                    (State::ExpectIndex, Step::Continue)
                } else if let Ok(sequence_number) = line.parse::<u32>() {
                    (State::ExpectTimeRange { sequence_number }, Step::Continue)
                } else {
                    // Stray content between blocks. Tolerated.
                    (State::ExpectIndex, Step::Skipped)
                }
            }
            State::ExpectTimeRange { sequence_number } => {
                if line.is_empty() {
                    (State::ExpectTimeRange { sequence_number }, Step::Continue)
                } else if let Some((show_at, hide_at)) = parse_time_range(line) {
                    (
                        State::ExpectText {
                            sequence_number,
                            show_at,
                            hide_at,
                            text: String::new(),
                        },
                        Step::Continue,
                    )
                } else {
                    // Lenient skip: keep waiting for a valid range line. The
                    // pending sequence number is retained, so a later range
                    // line still produces a cue.
                    (State::ExpectTimeRange { sequence_number }, Step::Skipped)
                }
            }
            State::ExpectText {
                sequence_number,
                show_at,
                hide_at,
                mut text,
            } => {
                if line.is_empty() {
                    let cue = Cue {
                        sequence_number,
                        show_at,
                        hide_at,
                        text: text.trim().to_string(),
                    };
                    (State::ExpectIndex, Step::Emit(cue))
                } else {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(line);
                    (
                        State::ExpectText {
                            sequence_number,
                            show_at,
                            hide_at,
                            text,
                        },
                        Step::Continue,
                    )
                }
            }
        }
    }

    /// End of input. A block missing its trailing blank line still yields its
    /// cue, as long as some text was accumulated.
    pub fn finish(self) -> Option<Cue> {
        match self {
            State::ExpectText {
                sequence_number,
                show_at,
                hide_at,
                text,
            } if !text.is_empty() => Some(Cue {
                sequence_number,
                show_at,
                hide_at,
                text: text.trim().to_string(),
            }),
            _ => None,
        }
    }
}

/// Parse the full contents of an SRT file into a [`CueTrack`].
///
/// Never fails: malformed lines are skipped and an input yielding no cues
/// comes back as an empty track with [`ParseOutcome::Empty`]. I/O belongs to
/// the caller.
pub fn parse(input: &str) -> Parsed {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    let mut cues = Vec::new();
    let mut skipped = 0usize;
    let mut dropped = 0usize;
    let mut state = State::ExpectIndex;

    for raw in input.lines() {
        let (next, step) = state.step(raw.trim());
        state = next;
        match step {
            Step::Continue => {}
            Step::Emit(cue) => accept(&mut cues, cue, &mut dropped),
            Step::Skipped => skipped += 1,
        }
    }
    if let Some(cue) = state.finish() {
        accept(&mut cues, cue, &mut dropped);
    }

    let outcome = if cues.is_empty() {
        ParseOutcome::Empty
    } else if skipped == 0 && dropped == 0 {
        ParseOutcome::Parsed
    } else {
        debug!(
            "recovered {} cues ({} lines skipped, {} cues dropped)",
            cues.len(),
            skipped,
            dropped
        );
        ParseOutcome::Partial
    };

    Parsed {
        track: CueTrack::new(cues),
        outcome,
    }
}

fn accept(cues: &mut Vec<Cue>, cue: Cue, dropped: &mut usize) {
    if cue.show_at < cue.hide_at {
        cues.push(cue);
    } else {
        warn!(
            "dropping cue {}: start {:?} is not before end {:?}",
            cue.sequence_number, cue.show_at, cue.hide_at
        );
        *dropped += 1;
    }
}

/// Parse a standalone `HH:MM:SS,mmm` timestamp, as accepted inside range
/// lines. Used for CLI time queries.
pub fn parse_timestamp(input: &str) -> Option<Duration> {
    match timestamp(input.trim()) {
        Ok(("", duration)) => Some(duration),
        _ => None,
    }
}

fn parse_time_range(line: &str) -> Option<(Duration, Duration)> {
    // Trailing content after the second timestamp (cruft such as position
    // hints) is ignored rather than invalidating the line.
    time_range(line).ok().map(|(_, range)| range)
}

fn time_range(input: &str) -> NomResult<(Duration, Duration)> {
    let (input, show_at) = timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, hide_at) = timestamp(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (show_at, hide_at)))
}

pub(crate) fn timestamp(input: &str) -> NomResult<Duration> {
    let (input, hours) = hms(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = hms(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = hms(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = millis(input)?;

    let total = millis + 1000 * (seconds + 60 * minutes + 3600 * hours);
    Ok((input, Duration::from_millis(total)))
}

// Hours, minutes and seconds may be written with a single digit (`1:13:45`);
// numerically identical to the zero-padded form.
fn hms(input: &str) -> NomResult<u64> {
    map_res(
        take_while_m_n(1, 2, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse(),
    )(input)
}

// A milliseconds value like `,2` is not valid SRT but occurs in the wild.
// It is read as if right-padded to three digits, i.e. `,200`.
fn millis(input: &str) -> NomResult<u64> {
    map_res(
        take_while_m_n(0, 3, |c: char| c.is_ascii_digit()),
        |s: &str| format!("{:0<3}", s).parse(),
    )(input)
}
