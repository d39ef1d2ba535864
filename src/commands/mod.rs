use crate::commands::cue::CueCommand;
use crate::commands::wave::WaveCommand;
use clap::{Parser, Subcommand};

pub mod cue;
pub mod wave;

/// CLI for converting audio CD CUE sheets to cdrdao TOC files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Cue(CueCommand),
    Wave(WaveCommand),
}
