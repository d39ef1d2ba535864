use crate::error::{CuetocError, CuetocResult};
use crate::wav::file::{WavReader, WavWriter};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Samples copied per cycle; bounds memory use and sets the progress bar
/// update rate.
const COPY_SIZE: u32 = 256 * 1024;

/// Shifts the audio data of a WAV file set by a positive or negative sample
/// offset. The input files are never modified; corrected copies are written
/// to a `wav+N`/`wav-N` directory next to the sources, or to a temp
/// directory. The files are treated as one continuous stream: data shifted
/// across a file boundary is taken from the neighboring file, and the first
/// or last file of the set is padded with silence.
pub struct WavOffsetWriter {
    offset: i64,
    pb: ProgressBar,
}

impl WavOffsetWriter {
    pub fn new(offset_samples: i64, mp: &MultiProgress) -> Self {
        let pb = mp.add(ProgressBar::new(0));
        pb.set_style(ProgressStyle::with_template("{msg} {wide_bar} {percent}%").unwrap());
        pb.set_message("processing WAV files:");
        Self {
            offset: offset_samples,
            pb,
        }
    }

    /// Runs the offset pass over all files, in order, and returns the new
    /// file paths.
    pub fn execute(&self, files: &[PathBuf], use_tmp: bool) -> CuetocResult<Vec<PathBuf>> {
        self.pb.set_length(total_samples(files)?);
        let out_files = self.output_names(files, use_tmp)?;
        if self.offset > 0 {
            // data moves forward: silence enters at the front of the first
            // file, every other file starts with the previous file's tail
            let prev = std::iter::once(None).chain(files.iter().map(Some));
            for ((out, cur), prv) in out_files.iter().zip(files).zip(prev) {
                self.insert_prev_end(out, cur, prv)?;
            }
        } else {
            // data moves backward: every file ends with the next file's
            // head, silence enters at the end of the last file
            let next = files.iter().skip(1).map(Some).chain(std::iter::once(None));
            for ((out, cur), nxt) in out_files.iter().zip(files).zip(next) {
                self.append_next_start(out, cur, nxt)?;
            }
        }
        self.pb.finish_and_clear();
        Ok(out_files)
    }

    fn output_names(&self, files: &[PathBuf], use_tmp: bool) -> CuetocResult<Vec<PathBuf>> {
        let tmp_dir = if use_tmp {
            Some(Builder::new().prefix("cuetoc.").tempdir()?.keep())
        } else {
            None
        };
        files
            .iter()
            .map(|f| {
                let name = f
                    .file_name()
                    .ok_or_else(|| CuetocError::FileNotFound(f.display().to_string()))?;
                match &tmp_dir {
                    Some(dir) => Ok(dir.join(name)),
                    None => {
                        let dir = f.parent().unwrap_or_else(|| Path::new("."));
                        let new_dir = dir.join(format!("wav{:+}", self.offset));
                        if !new_dir.exists() {
                            std::fs::create_dir(&new_dir)?;
                        }
                        Ok(new_dir.join(name))
                    }
                }
            })
            .collect()
    }

    /// Positive correction for one file: the previous file's tail (or
    /// silence) enters at the front and the same amount drops off the end.
    fn insert_prev_end(
        &self,
        out_path: &Path,
        input: &Path,
        prev: Option<&PathBuf>,
    ) -> CuetocResult<()> {
        debug!("shifting '{}' forward", input.display());
        let mut wav_in = WavReader::open(input)?;
        let bytes_per_sample = wav_in.bytes_per_sample();
        let offset = self.offset.unsigned_abs() as u32;
        let offset_bytes = offset as usize * bytes_per_sample as usize;
        let mut wav_out = WavWriter::create(out_path, wav_in.format, wav_in.data_size())?;

        match prev {
            Some(prev) => {
                let mut wav_prev = WavReader::open(prev)?;
                let tail = wav_prev
                    .sample_count()
                    .checked_sub(offset)
                    .ok_or(CuetocError::Underflow)?;
                wav_prev.seek_sample(tail)?;
                let mut data = vec![0u8; offset_bytes];
                let n = wav_prev.read_samples(&mut data)?;
                wav_out.write_samples(&data[..n])?;
                self.pb.inc((n as u32 / bytes_per_sample) as u64);
            }
            None => {
                wav_out.write_samples(&vec![0u8; offset_bytes])?;
                self.pb.inc(offset as u64);
            }
        }

        let mut samples_left = wav_in
            .sample_count()
            .checked_sub(offset)
            .ok_or(CuetocError::Underflow)?;
        let mut buf = vec![0u8; (COPY_SIZE * bytes_per_sample) as usize];
        while samples_left > 0 {
            let chunk = (samples_left.min(COPY_SIZE) * bytes_per_sample) as usize;
            let n = wav_in.read_samples(&mut buf[..chunk])?;
            wav_out.write_samples(&buf[..n])?;
            let copied = n as u32 / bytes_per_sample;
            samples_left -= copied;
            self.pb.inc(copied as u64);
        }
        wav_out.finish()
    }

    /// Negative correction for one file: playback starts `offset` samples
    /// in, and the next file's head (or silence) is appended at the end.
    fn append_next_start(
        &self,
        out_path: &Path,
        input: &Path,
        next: Option<&PathBuf>,
    ) -> CuetocResult<()> {
        debug!("shifting '{}' backward", input.display());
        let mut wav_in = WavReader::open(input)?;
        let bytes_per_sample = wav_in.bytes_per_sample();
        let offset = self.offset.unsigned_abs() as u32;
        let offset_bytes = offset as usize * bytes_per_sample as usize;
        let mut wav_out = WavWriter::create(out_path, wav_in.format, wav_in.data_size())?;

        wav_in.seek_sample(offset)?;
        let mut buf = vec![0u8; (COPY_SIZE * bytes_per_sample) as usize];
        loop {
            let n = wav_in.read_samples(&mut buf)?;
            if n == 0 {
                break;
            }
            wav_out.write_samples(&buf[..n])?;
            self.pb.inc((n as u32 / bytes_per_sample) as u64);
        }

        match next {
            Some(next) => {
                let mut wav_next = WavReader::open(next)?;
                let mut data = vec![0u8; offset_bytes];
                let n = wav_next.read_samples(&mut data)?;
                wav_out.write_samples(&data[..n])?;
                self.pb.inc((n as u32 / bytes_per_sample) as u64);
            }
            None => {
                wav_out.write_samples(&vec![0u8; offset_bytes])?;
                self.pb.inc(offset as u64);
            }
        }
        wav_out.finish()
    }
}

fn total_samples(files: &[PathBuf]) -> CuetocResult<u64> {
    let mut count = 0;
    for f in files {
        count += WavReader::open(f)?.sample_count() as u64;
    }
    Ok(count)
}
