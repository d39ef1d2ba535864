use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuetocError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    BinRwError(#[from] binrw::Error),

    #[error("Unmatched pattern in stream: '{0}'")]
    ParseError(String),

    #[error("Unmatched keyword in stream: '{0}'")]
    UnknownKeyword(String),

    #[error("Invalid time value: '{0}'")]
    BadTimeValue(String),

    #[error("No TRACK commands found in CUE data")]
    NoTracks,

    #[error("No FILE command before the first TRACK")]
    NoFileContext,

    #[error("Tracks must be numbered in order, found: '{0}'")]
    TrackOutOfOrder(String),

    #[error("Track {0} has no INDEX commands")]
    NoTrackIndex(u32),

    #[error("Track time calculation resulted in a negative value")]
    Underflow,

    #[error("Could not locate WAV file: '{0}'")]
    FileNotFound(String),

    #[error("More than one WAV file matches '{0}': {1:?}")]
    AmbiguousWavFile(String, Vec<PathBuf>),

    #[error("No CUE data to parse")]
    EmptyCue,

    #[error("Not a usable WAV file: {0}")]
    InvalidWavHeader(PathBuf),
}

pub type CuetocResult<T> = result::Result<T, CuetocError>;
