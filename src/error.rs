use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures on the subtitle load path. Malformed file contents are not errors;
/// the parser tolerates them and the worst outcome is an empty track.
#[derive(Debug)]
pub enum CueplayError {
    NotFound(PathBuf),
    NotSrt(PathBuf),
    Unreadable(PathBuf, io::Error),
}

impl Error for CueplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CueplayError::Unreadable(_, err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for CueplayError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CueplayError::NotFound(path) => {
                write!(fmt, "subtitle file not found: '{}'", path.display())
            }
            CueplayError::NotSrt(path) => {
                write!(fmt, "not an .srt file: '{}'", path.display())
            }
            CueplayError::Unreadable(path, _) => {
                write!(fmt, "failed to read subtitle file: '{}'", path.display())
            }
        }
    }
}
