use std::path::{Path, PathBuf};

use log::debug;

/// Ordered list of enqueued media files plus the cursor for the currently
/// selected entry. `None` means nothing is selected.
///
/// The cursor adjustment rules on removal are the load-bearing part: they keep
/// the selection stable under arbitrary insert/remove sequences.
#[derive(Debug, Default)]
pub struct Playlist {
    entries: Vec<PathBuf>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.map(|i| self.entries[i].as_path())
    }

    /// Append a file, rejecting duplicates by path. Returns whether the entry
    /// was added.
    pub fn append(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.entries.contains(&path) {
            debug!("already enqueued: '{}'", path.display());
            return false;
        }
        self.entries.push(path);
        true
    }

    /// Remove the entry at `index`, adjusting the cursor:
    /// - removal before the cursor shifts the cursor down by one;
    /// - removing the selected entry selects the one that slid into its slot,
    ///   or the new last entry if the removed one was last;
    /// - an emptied list has no selection.
    ///
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        self.entries.remove(index);

        self.current = match self.current {
            None => None,
            Some(_) if self.entries.is_empty() => None,
            Some(cur) if index < cur => Some(cur - 1),
            Some(cur) if index == cur => Some(cur.min(self.entries.len() - 1)),
            Some(cur) => Some(cur),
        };
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    /// Select an entry directly (a playlist row was activated). Out-of-range
    /// indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<&Path> {
        if index < self.entries.len() {
            self.current = Some(index);
        }
        self.current()
    }

    /// Move the cursor to the next entry. Clamped at the end of the list;
    /// returns whether it moved.
    pub fn advance(&mut self) -> bool {
        match self.current {
            Some(cur) if cur + 1 < self.entries.len() => {
                self.current = Some(cur + 1);
                true
            }
            None if !self.entries.is_empty() => {
                self.current = Some(0);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor to the previous entry. Clamped at the start of the
    /// list; returns whether it moved.
    pub fn retreat(&mut self) -> bool {
        match self.current {
            Some(cur) if cur > 0 => {
                self.current = Some(cur - 1);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(names: &[&str]) -> Playlist {
        let mut pl = Playlist::new();
        for name in names {
            assert!(pl.append(PathBuf::from(name)));
        }
        pl
    }

    #[test]
    fn append_rejects_duplicate_paths() {
        let mut pl = playlist(&["a.mkv"]);

        assert!(!pl.append("a.mkv"));
        assert_eq!(pl.len(), 1);
    }

    #[test]
    fn select_and_current() {
        let mut pl = playlist(&["a.mkv", "b.mkv"]);

        assert_eq!(pl.current(), None);
        assert_eq!(pl.select(1), Some(Path::new("b.mkv")));
        assert_eq!(pl.current_index(), Some(1));

        // Out of range: selection unchanged.
        pl.select(9);
        assert_eq!(pl.current_index(), Some(1));
    }

    #[test]
    fn remove_before_cursor_shifts_cursor_down() {
        let mut pl = playlist(&["a.mkv", "b.mkv", "c.mkv"]);
        pl.select(2);

        pl.remove(0);

        assert_eq!(pl.current_index(), Some(1));
        assert_eq!(pl.current(), Some(Path::new("c.mkv")));
    }

    #[test]
    fn remove_after_cursor_leaves_cursor_alone() {
        let mut pl = playlist(&["a.mkv", "b.mkv", "c.mkv"]);
        pl.select(0);

        pl.remove(2);

        assert_eq!(pl.current(), Some(Path::new("a.mkv")));
    }

    #[test]
    fn remove_selected_picks_following_entry() {
        let mut pl = playlist(&["a.mkv", "b.mkv", "c.mkv"]);
        pl.select(1);

        pl.remove(1);

        assert_eq!(pl.current(), Some(Path::new("c.mkv")));
    }

    #[test]
    fn remove_selected_last_picks_new_last() {
        let mut pl = playlist(&["a.mkv", "b.mkv", "c.mkv"]);
        pl.select(2);

        pl.remove(2);

        assert_eq!(pl.current(), Some(Path::new("b.mkv")));
    }

    #[test]
    fn remove_last_entry_clears_cursor() {
        let mut pl = playlist(&["a.mkv"]);
        pl.select(0);

        pl.remove(0);

        assert!(pl.is_empty());
        assert_eq!(pl.current_index(), None);
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut pl = playlist(&["a.mkv"]);
        pl.select(0);

        pl.remove(5);

        assert_eq!(pl.len(), 1);
        assert_eq!(pl.current_index(), Some(0));
    }

    #[test]
    fn clear_resets_cursor() {
        let mut pl = playlist(&["a.mkv", "b.mkv"]);
        pl.select(1);

        pl.clear();

        assert!(pl.is_empty());
        assert_eq!(pl.current_index(), None);
    }

    #[test]
    fn advance_and_retreat_clamp_at_bounds() {
        let mut pl = playlist(&["a.mkv", "b.mkv"]);

        // Nothing selected yet: advancing starts from the first entry.
        assert!(pl.advance());
        assert_eq!(pl.current_index(), Some(0));

        assert!(pl.advance());
        assert_eq!(pl.current_index(), Some(1));
        assert!(!pl.advance());
        assert_eq!(pl.current_index(), Some(1));

        assert!(pl.retreat());
        assert_eq!(pl.current_index(), Some(0));
        assert!(!pl.retreat());
        assert_eq!(pl.current_index(), Some(0));
    }

    #[test]
    fn retreat_with_empty_playlist() {
        let mut pl = Playlist::new();

        assert!(!pl.retreat());
        assert!(!pl.advance());
    }

    #[test]
    fn random_churn_keeps_cursor_in_bounds() {
        let mut pl = playlist(&["a", "b", "c", "d", "e"]);
        pl.select(3);

        pl.remove(4);
        pl.remove(0);
        assert_eq!(pl.current(), Some(Path::new("d")));

        pl.remove(2); // removes "d" itself, last entry now
        assert_eq!(pl.current(), Some(Path::new("c")));

        pl.remove(0);
        pl.remove(0);
        assert_eq!(pl.current_index(), None);
    }
}
