use crate::disc::time::TrackTime;
use crate::error::CuetocResult;
use crate::wav::offset::WavOffsetWriter;
use indicatif::MultiProgress;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

pub mod time;

/// Disc write mode token emitted on the first TOC line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DiscMode {
    /// Standard audio disc.
    #[default]
    CdDa,
    /// Multi-session disc, required when data tracks are present.
    CdRomXa,
}

impl fmt::Display for DiscMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscMode::CdDa => write!(f, "CD_DA"),
            DiscMode::CdRomXa => write!(f, "CD_ROM_XA"),
        }
    }
}

/// Whole-disc metadata parsed from the CUE header region.
#[derive(Debug, Default)]
pub struct Disc {
    pub catalog: Option<String>,
    pub date: Option<String>,
    pub discid: Option<String>,
    pub genre: Option<String>,
    pub performer: Option<String>,
    pub title: Option<String>,
    mode: DiscMode,
}

impl Disc {
    pub fn mode(&self) -> DiscMode {
        self.mode
    }

    /// Switches the disc to multi-session output mode.
    pub fn set_multisession(&mut self) {
        self.mode = DiscMode::CdRomXa;
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = vec![self.mode.to_string()];
        if let Some(catalog) = &self.catalog {
            out.push(format!("CATALOG \"{catalog}\""));
        }
        out.push("CD_TEXT { LANGUAGE_MAP { 0:EN }\n\tLANGUAGE 0 {".to_string());
        if let Some(title) = &self.title {
            out.push(format!("\t\tTITLE \"{title}\""));
        }
        if let Some(performer) = &self.performer {
            out.push(format!("\t\tPERFORMER \"{performer}\""));
        }
        if let Some(discid) = &self.discid {
            out.push(format!("\t\tDISC_ID \"{discid}\""));
        }
        out.push("}}".to_string());
        write!(f, "{}", out.join("\n"))
    }
}

/// The TOC command an index renders to. Each variant carries only the
/// fields that command emits, so a start time consumed into a START length
/// or a length discarded by an INDEX marker cannot be read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexCommand {
    /// Audio data, or pre-gap plus audio, read from a file.
    Audio {
        time: TrackTime,
        length: Option<TrackTime>,
    },
    /// Pre-gap audio only; rendered as AUDIOFILE followed by a bare START.
    PreAudio {
        time: TrackTime,
        length: Option<TrackTime>,
    },
    /// A sub-index at a file offset inside a previous AUDIOFILE command.
    Index { time: TrackTime },
    /// Marks where the pre-gap inside a shared file ends.
    Start { length: TrackTime },
}

/// One index of an audio track: where its data starts, in which file, and
/// which TOC command it renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackIndex {
    pub num: u32,
    /// Audio file backing this index. Kept outside the command variant:
    /// reclassified indexes still take part in shared-file comparisons.
    pub file: PathBuf,
    pub cmd: IndexCommand,
}

impl TrackIndex {
    pub fn new(num: u32, time: TrackTime, file: PathBuf, length: Option<TrackTime>) -> Self {
        debug!("creating index '{}, {}'", file.display(), time);
        Self {
            num,
            file,
            cmd: IndexCommand::Audio { time, length },
        }
    }

    /// Starting offset in the audio data, for commands that still carry one.
    pub fn start(&self) -> Option<TrackTime> {
        match self.cmd {
            IndexCommand::Audio { time, .. }
            | IndexCommand::PreAudio { time, .. }
            | IndexCommand::Index { time } => Some(time),
            IndexCommand::Start { .. } => None,
        }
    }

    /// Fixes up this index and its successor within the same track. Must
    /// run once, after parsing, before the index data is used.
    fn mung(&mut self, next: &mut TrackIndex) -> CuetocResult<()> {
        // A pre-gap index whose audio lives in its own file: the whole file
        // is pre-gap data and the output places a START between this index
        // and the next.
        if self.num == 0 && self.file != next.file {
            if let IndexCommand::Audio { time, length } = self.cmd {
                self.cmd = IndexCommand::PreAudio { time, length };
            }
        }

        // Current and next index share one physical file.
        if self.file == next.file {
            if let IndexCommand::Audio { time: next_time, .. } = next.cmd {
                if self.num == 0 {
                    // The shared file opens with pre-gap data; the successor
                    // marks the true track start and its start time is
                    // consumed into the pre-gap length.
                    if let IndexCommand::Audio { time, .. } = self.cmd {
                        next.cmd = IndexCommand::Start {
                            length: next_time.try_sub(&time)?,
                        };
                    }
                } else {
                    // Interior sub-index. INDEX is specified by file offset
                    // and carries no length.
                    next.cmd = IndexCommand::Index { time: next_time };
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TrackIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |length: Option<TrackTime>| {
            length.map(|l| l.to_string()).unwrap_or_default()
        };
        match self.cmd {
            IndexCommand::Audio { time, length } => {
                write!(
                    f,
                    "\tAUDIOFILE \"{}\" {} {}",
                    self.file.display(),
                    time,
                    opt(length)
                )
            }
            IndexCommand::PreAudio { time, length } => {
                write!(
                    f,
                    "\tAUDIOFILE \"{}\" {} {}\n\tSTART",
                    self.file.display(),
                    time,
                    opt(length)
                )
            }
            IndexCommand::Index { time } => write!(f, "\tINDEX {time}"),
            IndexCommand::Start { length } => write!(f, "\tSTART {length}"),
        }
    }
}

/// Per-track metadata and the ordered list of indexes holding its audio.
#[derive(Debug, Default)]
pub struct Track {
    pub num: u32,
    pub dcp: bool,
    pub four_ch: bool,
    pub pre: bool,
    pub is_data: bool,
    pub isrc: Option<String>,
    pub performer: Option<String>,
    pub title: Option<String>,
    pub pregap: Option<TrackTime>,
    pub indexes: Vec<TrackIndex>,
}

impl Track {
    pub fn new(num: u32) -> Self {
        Self {
            num,
            ..Self::default()
        }
    }

    /// Indexes must be appended in CUE order.
    pub fn append_index(&mut self, idx: TrackIndex) {
        self.indexes.push(idx);
    }

    /// Fixes up inconsistencies left over from parsing, using the first
    /// index of the following track (None for the last track) as context.
    /// Before this runs the track data is in a provisional state.
    pub fn mung(&mut self, next_first: Option<&TrackIndex>) -> CuetocResult<()> {
        for i in 0..self.indexes.len() {
            // An AUDIOFILE index sharing its file with the next track must
            // stop where that track starts, not at end of file.
            if let Some(first) = next_first {
                let idx = &mut self.indexes[i];
                if idx.file == first.file {
                    if let (IndexCommand::Audio { time, length }, Some(end)) =
                        (&mut idx.cmd, first.start())
                    {
                        *length = Some(end.try_sub(time)?);
                    }
                }
            }
            if i + 1 < self.indexes.len() {
                let (head, tail) = self.indexes.split_at_mut(i + 1);
                head[i].mung(&mut tail[0])?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // data tracks produce no output
        if self.is_data {
            return Ok(());
        }
        let mut out = vec![format!("\n//Track {}", self.num), "TRACK AUDIO".to_string()];
        if let Some(isrc) = &self.isrc {
            out.push(format!("\tISRC \"{isrc}\""));
        }
        if self.dcp {
            out.push("\tCOPY".to_string());
        }
        if self.four_ch {
            out.push("\tFOUR_CHANNEL_AUDIO".to_string());
        }
        if self.pre {
            out.push("\tPRE_EMPHASIS".to_string());
        }
        out.push("\tCD_TEXT { LANGUAGE 0 {".to_string());
        if let Some(title) = &self.title {
            out.push(format!("\t\tTITLE \"{title}\""));
        }
        if let Some(performer) = &self.performer {
            out.push(format!("\t\tPERFORMER \"{performer}\""));
        }
        out.push("\t}}".to_string());
        if let Some(pregap) = &self.pregap {
            out.push(format!("\tPREGAP {pregap}"));
        }
        for idx in &self.indexes {
            out.push(idx.to_string());
        }
        write!(f, "{}", out.join("\n"))
    }
}

/// Fully parsed disc layout, ready to be rendered as a TOC.
#[derive(Debug)]
pub struct CdData {
    pub disc: Disc,
    pub tracks: Vec<Track>,
    /// WAV files referenced by the source, in order of appearance.
    pub files: Vec<PathBuf>,
}

impl CdData {
    /// Runs the rewrite pass across the whole track sequence. Each track
    /// sees the first index of its successor; the last track sees none.
    pub fn mung(&mut self) -> CuetocResult<()> {
        for i in 0..self.tracks.len() {
            let (head, tail) = self.tracks.split_at_mut(i + 1);
            let next_first = tail.first().and_then(|t| t.indexes.first());
            head[i].mung(next_first)?;
        }
        Ok(())
    }

    /// Renders the TOC text: disc block, then each audio track's block.
    /// Tabs are expanded to 4 spaces and trailing whitespace is trimmed.
    pub fn toc(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        lines.extend(self.disc.to_string().split('\n').map(str::to_string));
        for trk in &self.tracks {
            if trk.is_data {
                continue;
            }
            lines.extend(trk.to_string().split('\n').map(str::to_string));
        }
        lines
            .iter()
            .map(|line| expand_tabs(line, 4).trim_end().to_string())
            .collect()
    }

    /// Rewrites all referenced WAV files with a sample offset and re-points
    /// every index at the corrected copies.
    pub fn apply_wav_offset(
        &mut self,
        pb: &MultiProgress,
        samples: i64,
        use_tmp: bool,
    ) -> CuetocResult<()> {
        let writer = WavOffsetWriter::new(samples, pb);
        let new_files = writer.execute(&self.files, use_tmp)?;
        let file_map: HashMap<&PathBuf, &PathBuf> =
            self.files.iter().zip(new_files.iter()).collect();
        for trk in &mut self.tracks {
            for idx in &mut trk.indexes {
                if let Some(new_file) = file_map.get(&idx.file) {
                    debug!("updating index file '{}'", idx.file.display());
                    idx.file = (*new_file).clone();
                }
            }
        }
        self.files = new_files;
        Ok(())
    }
}

fn expand_tabs(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = width - col % width;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out
}
