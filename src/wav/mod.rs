use crate::disc::time::TrackTime;
use crate::error::{CuetocError, CuetocResult};
use async_recursion::async_recursion;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod file;
pub mod offset;

/// Access to the WAV files referenced by a track layout. Injectable so the
/// parsers can be driven without touching the file system.
pub trait WavSource {
    /// Resolves a file name from the CUE text to a real path.
    fn locate(&self, name: &str) -> CuetocResult<PathBuf>;

    /// Audio length of the file, when it is readable and in a known format.
    fn duration(&self, path: &Path) -> Option<TrackTime>;
}

lazy_static! {
    static ref WAV_EXT: Regex = RegexBuilder::new(r"\.wav$")
        .case_insensitive(true)
        .build()
        .unwrap();
}

/// Only the first n files below the working directory are cached, to bound
/// file system access.
const MAX_CACHED_FILES: usize = 1000;

/// WAV files found below the working directory, collected once per
/// conversion. Lookups try the exact name first, then fall back to fuzzy
/// matching against the cache to correct common file name variations.
pub struct WavFileCache {
    wav_files: Vec<PathBuf>,
}

impl WavFileCache {
    pub async fn new(src_dir: &Path) -> CuetocResult<Self> {
        let mut wav_files = Vec::new();
        let mut seen = 0;
        collect_wav_files(src_dir, &mut wav_files, &mut seen).await?;
        debug!("cached {} WAV files under {src_dir:?}", wav_files.len());
        Ok(Self { wav_files })
    }
}

#[async_recursion]
async fn collect_wav_files(
    dir: &Path,
    out: &mut Vec<PathBuf>,
    seen: &mut usize,
) -> CuetocResult<()> {
    if *seen > MAX_CACHED_FILES {
        return Ok(());
    }
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_dir() {
            collect_wav_files(&path, out, seen).await?;
        } else {
            *seen += 1;
            if WAV_EXT.is_match(&path.to_string_lossy()) {
                out.push(path);
            }
        }
    }
    Ok(())
}

impl WavSource for WavFileCache {
    fn locate(&self, name: &str) -> CuetocResult<PathBuf> {
        debug!("looking for file '{name}'");
        // DOS path separators from foreign CUE files
        let unix_name = name.replace('\\', "/");
        if WAV_EXT.is_match(&unix_name) && Path::new(&unix_name).exists() {
            return Ok(PathBuf::from(unix_name));
        }

        let stem = Path::new(&unix_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .trim();
        // the stem itself plus both space/underscore spellings, matched
        // case-insensitively anywhere inside a cached path
        let variants = [
            stem.to_string(),
            stem.replace(' ', "_"),
            stem.replace('_', " "),
        ];
        let pattern = variants
            .iter()
            .map(|v| format!(r"/.*{}.*\.wav$", regex::escape(v)))
            .collect::<Vec<_>>()
            .join("|");
        let file_regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .unwrap();

        let mut candidates: Vec<PathBuf> = self
            .wav_files
            .iter()
            .filter(|f| file_regex.is_match(&f.to_string_lossy()))
            .cloned()
            .collect();
        match candidates.len() {
            0 => Err(CuetocError::FileNotFound(name.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(CuetocError::AmbiguousWavFile(name.to_string(), candidates)),
        }
    }

    fn duration(&self, path: &Path) -> Option<TrackTime> {
        let wav = file::WavReader::open(path).ok()?;
        Some(TrackTime::from_frames(wav.cd_frames()))
    }
}
