use clap::Parser;
use std::path::PathBuf;

/// Builds a cdrdao TOC file from an in-order list of WAV files, one audio
/// track per file.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct WaveCommand {
    /// WAV files in track order
    #[arg(value_name = "WAV_FILES", required = true, num_args = 1..)]
    pub wav_files: Vec<PathBuf>,

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
