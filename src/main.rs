use crate::commands::{Cli, Commands};
use crate::error::CuetocError;
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::error;
use std::process::ExitCode;

mod commands;
mod disc;
mod error;
mod parser;
mod wav;

pub mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Cue(cmd) => parser::convert_cue(pb.clone(), cmd).await,
        Commands::Wave(cmd) => parser::convert_wavs(pb.clone(), cmd).await,
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // empty input is a normal condition, only the exit code reports it
        Err(CuetocError::EmptyCue) => Ok(ExitCode::FAILURE),
        Err(e @ (CuetocError::FileNotFound(_) | CuetocError::AmbiguousWavFile(..))) => {
            error!("{e}");
            error!(
                "cdrdao can not correctly write pregaps without explicit file lengths; \
                 if you know what you are doing, disable this check with --allow-missing-wav"
            );
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            error!("unrecoverable error: {e}");
            error!("if you believe the CUE file is correct, please report it as a bug");
            Ok(ExitCode::FAILURE)
        }
    }
}
