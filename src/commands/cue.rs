use clap::Parser;
use std::path::PathBuf;

/// Converts a CUE sheet to a cdrdao TOC file.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct CueCommand {
    /// Input CUE file, read from STDIN when omitted
    #[arg(value_name = "CUE_FILE")]
    pub cue_file: Option<PathBuf>,

    /// Output TOC file, written to STDOUT when omitted
    #[arg(short, long, value_name = "TOC_FILE")]
    pub output: Option<PathBuf>,

    /// Do not abort when WAV file(s) are missing (experts only)
    #[arg(short = 'a', long, conflicts_with = "offset_correction")]
    pub allow_missing_wav: bool,

    /// Correct reader/writer offset by creating WAV file(s) shifted by
    /// WAV_OFFSET samples (original data is not modified)
    #[arg(short = 'c', long, value_name = "WAV_OFFSET")]
    pub offset_correction: Option<i64>,

    /// Write offset corrected WAV files to a temp directory
    #[arg(short = 't', long, requires = "offset_correction")]
    pub use_temp: bool,
}
