use crate::error::CueplayError;
use crate::parser::{self, ParseOutcome};
use crate::playlist::Playlist;
use crate::srt::CueTrack;

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};

/// Owns the active subtitle track for a playback session.
///
/// Loading replaces the whole track in one move; lookups are read-only, so the
/// single-writer discipline of the owning context is all the synchronisation
/// this needs.
#[derive(Debug, Default)]
pub struct SubtitleManager {
    track: Option<CueTrack>,
}

impl SubtitleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an `.srt` file, replacing any previous track. Returns whether
    /// subtitles are active afterwards, for UI status reporting: a missing or
    /// unreadable file, a wrong extension, and a file yielding zero cues all
    /// come back as `false`.
    pub fn load_subtitle(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(outcome) => {
                if outcome == ParseOutcome::Partial {
                    warn!("'{}' only partially parsed", path.display());
                }
                info!(
                    "loaded '{}': {} cues",
                    path.display(),
                    self.track.as_ref().map_or(0, CueTrack::len)
                );
                self.is_active()
            }
            Err(err) => {
                warn!("{}", err);
                false
            }
        }
    }

    fn try_load(&mut self, path: &Path) -> Result<ParseOutcome, CueplayError> {
        if !path.exists() {
            return Err(CueplayError::NotFound(path.to_path_buf()));
        }
        let is_srt = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("srt"));
        if !is_srt {
            return Err(CueplayError::NotSrt(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|err| CueplayError::Unreadable(path.to_path_buf(), err))?;

        let parsed = parser::parse(&contents);
        // "Loaded but empty" leaves subtitles inactive.
        self.track = if parsed.track.is_empty() {
            None
        } else {
            Some(parsed.track)
        };
        Ok(parsed.outcome)
    }

    /// Drop the active track. The next tick resolves to no text, which the
    /// host forwards to clear its display surface.
    pub fn disable(&mut self) {
        self.track = None;
    }

    pub fn is_active(&self) -> bool {
        self.track.is_some()
    }

    pub fn track(&self) -> Option<&CueTrack> {
        self.track.as_ref()
    }

    /// Per-tick lookup body: the text to display at `time`, or `None` to
    /// clear. Pure with respect to the track.
    pub fn text_at(&self, time: Duration) -> Option<&str> {
        self.track.as_ref().and_then(|track| track.text_at(time))
    }
}

/// Playlist plus subtitle state for one playback session. All methods run on
/// the owning context; the host marshals clock callbacks here.
#[derive(Debug, Default)]
pub struct PlayerSession {
    playlist: Playlist,
    subtitles: SubtitleManager,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut Playlist {
        &mut self.playlist
    }

    pub fn subtitles(&self) -> &SubtitleManager {
        &self.subtitles
    }

    /// Enqueue a file (deduplicated by path) and select it. Any subtitle
    /// track from the previous media is discarded; the caller reloads one
    /// explicitly if an accompanying file exists.
    pub fn open_media(&mut self, path: impl Into<PathBuf>) -> Option<&Path> {
        let path = path.into();
        self.playlist.append(path.clone());
        let index = self
            .playlist
            .entries()
            .iter()
            .position(|entry| *entry == path);
        self.subtitles.disable();
        index.and_then(|i| self.playlist.select(i))
    }

    pub fn load_subtitle(&mut self, path: impl AsRef<Path>) -> bool {
        self.subtitles.load_subtitle(path)
    }

    pub fn disable_subtitles(&mut self) {
        self.subtitles.disable();
    }

    /// Skip to the next playlist entry, if any. Subtitles for the previous
    /// media are dropped.
    pub fn play_next(&mut self) -> Option<&Path> {
        if self.playlist.advance() {
            self.subtitles.disable();
            self.playlist.current()
        } else {
            None
        }
    }

    /// Skip to the previous playlist entry, if any.
    pub fn play_previous(&mut self) -> Option<&Path> {
        if self.playlist.retreat() {
            self.subtitles.disable();
            self.playlist.current()
        } else {
            None
        }
    }

    /// End-of-media: advance to the next entry, or report `None` when the
    /// playlist is exhausted and playback should stop.
    pub fn handle_media_end(&mut self) -> Option<&Path> {
        match self.play_next() {
            Some(next) => {
                info!("end of media, continuing with '{}'", next.display());
                Some(next)
            }
            None => {
                info!("end of playlist");
                None
            }
        }
    }

    /// Per-tick callback body. The host forwards the result (or an empty
    /// string) to the display surface.
    pub fn tick(&self, time: Duration) -> Option<&str> {
        self.subtitles.text_at(time)
    }
}
