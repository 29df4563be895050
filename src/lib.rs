//! Subtitle engine and playback-session bookkeeping for a media player
//! front-end.
//!
//! The decoding, rendering and A/V sync of a player belong to a media engine;
//! what a front-end actually owns is narrow: parsing SRT files into timed
//! cues, resolving the cue active at the current playback position on every
//! clock tick, and keeping the playlist cursor honest while entries come and
//! go. This crate implements exactly that, UI-free:
//!
//! - [`parser`] turns SRT text into a [`srt::CueTrack`] via a tolerant
//!   line-by-line state machine;
//! - [`srt::CueTrack::cue_at`] answers "what should be on screen now" in
//!   O(log n), deterministically even for overlapping cues;
//! - [`playlist::Playlist`] and [`session::PlayerSession`] carry the
//!   enqueued-files cursor rules and the subtitle track lifecycle;
//! - [`clock::PlaybackClock`] is the explicit subscribe/unsubscribe seam the
//!   host's media engine drives.

pub mod clock;
pub mod error;
pub mod parser;
pub mod playlist;
pub mod session;
pub mod srt;

pub use clock::{ClockEvent, PlaybackClock, Subscription};
pub use error::CueplayError;
pub use parser::{parse, ParseOutcome};
pub use playlist::Playlist;
pub use session::{PlayerSession, SubtitleManager};
pub use srt::{Cue, CueTrack};
