use std::time::Duration;

/// One timed subtitle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Position of the cue in the source file. Informational only; SRT files
    /// in the wild are neither contiguous nor reliably ordered.
    pub sequence_number: u32,
    pub show_at: Duration,
    pub hide_at: Duration,
    /// Display text, newline-joined for multi-line cues.
    pub text: String,
}

/// The cues parsed from one subtitle file, sorted by `show_at`.
///
/// A track is built once per successful parse and never mutated afterwards;
/// the player replaces the whole track when a new file is loaded.
#[derive(Debug, Default)]
pub struct CueTrack {
    cues: Vec<Cue>,
    // Running maximum of hide_at over cues[0..=i]. Monotonic, so the earliest
    // cue still covering a timestamp can be found by binary search even when
    // cue ranges overlap.
    max_hide: Vec<Duration>,
}

impl CueTrack {
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|c| c.show_at);
        let mut max_hide = Vec::with_capacity(cues.len());
        let mut running = Duration::ZERO;
        for cue in &cues {
            running = running.max(cue.hide_at);
            max_hide.push(running);
        }
        Self { cues, max_hide }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// The cue active at `time`: the first cue in ascending `show_at` order
    /// with `show_at <= time < hide_at`, or `None` if no cue covers that
    /// instant. When overlapping cues both cover `time`, the one with the
    /// smaller `show_at` wins (file order breaks exact ties, since the load
    /// sort is stable).
    pub fn cue_at(&self, time: Duration) -> Option<&Cue> {
        // Cues at indices 0..started all satisfy show_at <= time.
        let started = self.cues.partition_point(|c| c.show_at <= time);
        // Within that prefix, the first index whose running-max hide_at
        // exceeds `time` is exactly the earliest cue with hide_at > time.
        let candidate = self.max_hide[..started].partition_point(|&h| h <= time);
        self.cues[..started].get(candidate)
    }

    /// Display text for the cue active at `time`, if any.
    pub fn text_at(&self, time: Duration) -> Option<&str> {
        self.cue_at(time).map(|c| c.text.as_str())
    }
}
