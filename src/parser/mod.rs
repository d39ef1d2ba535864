use crate::commands::cue::CueCommand;
use crate::commands::wave::WaveCommand;
use crate::disc::time::TrackTime;
use crate::disc::{CdData, Disc, Track, TrackIndex};
use crate::error::{CuetocError, CuetocResult};
use crate::wav::{WavFileCache, WavSource};
use indicatif::MultiProgress;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::parser::matcher::PatternSet;

pub mod matcher;

// file name pattern, shared by all scan passes
const FILE_PATTERN: (&str, &str) = ("file", r#"^\s*FILE\s+"(?P<file>.*)"\s+WAVE$"#);
// track command pattern, used by the structural and per-track passes
const TRACK_PATTERN: (&str, &str) = (
    "track",
    r"^\s*TRACK\s+(?P<num>\d+)\s+(?P<mode>AUDIO|MODE.*)$",
);
// disc info patterns, applied to the region before the first TRACK
const DISC_PATTERNS: [(&str, &str); 3] = [
    ("rem", r"^\s*REM\s+(?P<key>\w+)\s+(?P<value>.*)$"),
    ("catalog", r"^\s*(?P<key>CATALOG)\s+(?P<value>\d{13})$"),
    ("quote", r#"^\s*(?P<key>\w+)\s+"(?P<value>.*)"$"#),
];
// track info patterns, applied to each track's line slice
const TINFO_PATTERNS: [(&str, &str); 4] = [
    (
        "index",
        r"^\s*INDEX\s+(?P<num>\d+)\s+(?P<time>\d{2}:\d{2}:\d{2})$",
    ),
    ("quote", r#"^\s*(?P<key>PERFORMER|TITLE)\s+"(?P<value>.*)"$"#),
    ("named", r"^\s*(?P<key>ISRC|PREGAP)\s+(?P<value>.*)$"),
    ("flag", r"^\s*FLAGS\s+(?P<flags>.*)$"),
];

lazy_static! {
    static ref REM_COMMENT: Regex = Regex::new(r"^\s*REM\s+COMMENT").unwrap();
    static ref PART_SEARCH: PatternSet = PatternSet::new(&[FILE_PATTERN, TRACK_PATTERN]);
    static ref DISC_SEARCH: PatternSet = {
        let mut patterns = vec![FILE_PATTERN];
        patterns.extend(DISC_PATTERNS);
        PatternSet::new(&patterns)
    };
    static ref TINFO_SEARCH: PatternSet = {
        let mut patterns = vec![FILE_PATTERN, TRACK_PATTERN];
        patterns.extend(TINFO_PATTERNS);
        PatternSet::new(&patterns)
    };
}

/// Resolves CUE file names through a [`WavSource`], remembering earlier
/// answers so each distinct name is looked up once per conversion.
struct FileLookup<'a> {
    wav: &'a dyn WavSource,
    find_wav: bool,
    resolved: HashMap<String, PathBuf>,
}

impl<'a> FileLookup<'a> {
    fn new(wav: &'a dyn WavSource, find_wav: bool) -> Self {
        Self {
            wav,
            find_wav,
            resolved: HashMap::new(),
        }
    }

    fn resolve(&mut self, name: &str) -> CuetocResult<PathBuf> {
        if let Some(path) = self.resolved.get(name) {
            return Ok(path.clone());
        }
        let path = match self.wav.locate(name) {
            Ok(path) => path,
            // tolerated lookup failures fall back to the verbatim CUE name
            Err(CuetocError::FileNotFound(_) | CuetocError::AmbiguousWavFile(..))
                if !self.find_wav =>
            {
                PathBuf::from(name)
            }
            Err(e) => return Err(e),
        };
        self.resolved.insert(name.to_string(), path.clone());
        Ok(path)
    }
}

/// CUE sheet parser. Matches the known CUE format in three passes over the
/// text and converts the result to [`CdData`], from which the file can be
/// re-created in TOC form.
pub struct CueParser<'a> {
    lookup: FileLookup<'a>,
}

impl<'a> CueParser<'a> {
    /// `find_wav` makes a failed WAV file resolution fatal; without it the
    /// verbatim CUE name is kept and no file length is available.
    pub fn new(wav: &'a dyn WavSource, find_wav: bool) -> Self {
        Self {
            lookup: FileLookup::new(wav, find_wav),
        }
    }

    pub fn parse(&mut self, text: &str) -> CuetocResult<CdData> {
        // drop comments and blank lines before any pass runs
        let cue: Vec<&str> = text
            .lines()
            .filter(|line| !REM_COMMENT.is_match(line))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if cue.is_empty() {
            return Err(CuetocError::EmptyCue);
        }

        let (file_lines, track_lines, files) = self.build_lookup(&cue)?;
        let Some(&first_track_line) = track_lines.first() else {
            return Err(CuetocError::NoTracks);
        };

        let mut disc = self.parse_disc(&cue[..first_track_line])?;
        let mut tracks = Vec::with_capacity(track_lines.len());
        for (i, &line_num) in track_lines.iter().enumerate() {
            let end = track_lines.get(i + 1).copied().unwrap_or(cue.len());
            let file_context = active_file(&file_lines, line_num)?;
            tracks.push(self.parse_track(
                i as u32 + 1,
                &cue[line_num..end],
                file_context,
                &mut disc,
            )?);
        }

        let mut cd = CdData { disc, tracks, files };
        cd.mung()?;
        Ok(cd)
    }

    /// Structural pass: record the location of every FILE and TRACK line,
    /// resolving file names as they appear.
    fn build_lookup(
        &mut self,
        cue: &[&str],
    ) -> CuetocResult<(Vec<(usize, PathBuf)>, Vec<usize>, Vec<PathBuf>)> {
        let mut file_lines = Vec::new();
        let mut track_lines = Vec::new();
        for (i, line) in cue.iter().enumerate() {
            match PART_SEARCH.find(line) {
                Some(("file", caps)) => {
                    let path = self.lookup.resolve(&caps["file"])?;
                    file_lines.push((i, path));
                }
                Some(("track", _)) => track_lines.push(i),
                _ => {}
            }
        }
        let files = file_lines.iter().map(|(_, path)| path.clone()).collect();
        Ok((file_lines, track_lines, files))
    }

    /// Disc info pass over the region before the first TRACK line.
    fn parse_disc(&mut self, lines: &[&str]) -> CuetocResult<Disc> {
        let mut disc = Disc::default();
        for line in lines {
            let Some((tag, caps)) = DISC_SEARCH.find(line) else {
                return Err(CuetocError::ParseError((*line).to_string()));
            };
            // FILE lines were handled by the structural pass
            if tag == "file" {
                continue;
            }
            let key = caps["key"].to_lowercase();
            let value = caps["value"].trim().to_string();
            match key.as_str() {
                "catalog" => disc.catalog = Some(value),
                "date" => disc.date = Some(value),
                "discid" => disc.discid = Some(value),
                "genre" => disc.genre = Some(value),
                "performer" => disc.performer = Some(value),
                "title" => disc.title = Some(value),
                _ => return Err(CuetocError::UnknownKeyword((*line).to_string())),
            }
        }
        Ok(disc)
    }

    /// Per-track pass over the slice from one TRACK line to the next. The
    /// active file context enters as the most recent FILE line before the
    /// track and follows any FILE line inside the slice.
    fn parse_track(
        &mut self,
        num: u32,
        lines: &[&str],
        mut file_name: PathBuf,
        disc: &mut Disc,
    ) -> CuetocResult<Track> {
        let mut trk = Track::new(num);
        for line in lines {
            let Some((tag, caps)) = TINFO_SEARCH.find(line) else {
                return Err(CuetocError::ParseError((*line).to_string()));
            };
            match tag {
                "track" => {
                    let parsed: u32 = caps["num"]
                        .parse()
                        .map_err(|_| CuetocError::ParseError((*line).to_string()))?;
                    if parsed != trk.num {
                        return Err(CuetocError::TrackOutOfOrder((*line).to_string()));
                    }
                    if &caps["mode"] != "AUDIO" {
                        trk.is_data = true;
                        disc.set_multisession();
                    }
                }
                "file" => file_name = self.lookup.resolve(&caps["file"])?,
                "index" => {
                    let idx_num: u32 = caps["num"]
                        .parse()
                        .map_err(|_| CuetocError::ParseError((*line).to_string()))?;
                    let time = TrackTime::parse(&caps["time"])?;
                    // default length is the rest of the file, when measurable
                    let length = match self.lookup.wav.duration(&file_name) {
                        Some(total) => Some(total.try_sub(&time)?),
                        None => None,
                    };
                    trk.append_index(TrackIndex::new(idx_num, time, file_name.clone(), length));
                }
                "quote" | "named" => {
                    let key = caps["key"].to_lowercase();
                    let value = caps["value"].trim();
                    match key.as_str() {
                        "performer" => trk.performer = Some(value.to_string()),
                        "title" => trk.title = Some(value.to_string()),
                        "isrc" => trk.isrc = Some(value.to_string()),
                        "pregap" => trk.pregap = Some(TrackTime::parse(value)?),
                        _ => return Err(CuetocError::UnknownKeyword((*line).to_string())),
                    }
                }
                "flag" => {
                    for flag in caps["flags"].split_whitespace() {
                        match flag {
                            "DCP" => trk.dcp = true,
                            "4CH" => trk.four_ch = true,
                            "PRE" => trk.pre = true,
                            // unrecognized flag tokens are not an error
                            _ => {}
                        }
                    }
                }
                _ => return Err(CuetocError::ParseError((*line).to_string())),
            }
        }
        if trk.indexes.is_empty() {
            return Err(CuetocError::NoTrackIndex(trk.num));
        }
        Ok(trk)
    }
}

/// Returns the WAV file named by the last FILE line above `track_line`.
fn active_file(file_lines: &[(usize, PathBuf)], track_line: usize) -> CuetocResult<PathBuf> {
    file_lines
        .iter()
        .rev()
        .find(|(line_num, _)| *line_num < track_line)
        .map(|(_, path)| path.clone())
        .ok_or(CuetocError::NoFileContext)
}

/// Builds a TOC from an in-order list of WAV files, each file becoming one
/// audio track with a single index at time zero.
pub struct WavParser<'a> {
    lookup: FileLookup<'a>,
}

impl<'a> WavParser<'a> {
    pub fn new(wav: &'a dyn WavSource, find_wav: bool) -> Self {
        Self {
            lookup: FileLookup::new(wav, find_wav),
        }
    }

    pub fn parse(&mut self, wav_files: &[String]) -> CuetocResult<CdData> {
        if wav_files.is_empty() {
            return Err(CuetocError::EmptyCue);
        }
        let files = wav_files
            .iter()
            .map(|name| self.lookup.resolve(name))
            .collect::<CuetocResult<Vec<_>>>()?;
        let mut tracks = Vec::with_capacity(files.len());
        for (i, file) in files.iter().enumerate() {
            let mut trk = Track::new(i as u32 + 1);
            let time = TrackTime::default();
            let length = self.lookup.wav.duration(file);
            trk.append_index(TrackIndex::new(1, time, file.clone(), length));
            tracks.push(trk);
        }
        let mut cd = CdData {
            disc: Disc::default(),
            tracks,
            files,
        };
        cd.mung()?;
        Ok(cd)
    }
}

/// Converts a CUE sheet (file or STDIN) to a TOC file (file or STDOUT).
pub async fn convert_cue(pb: MultiProgress, cmd: CueCommand) -> CuetocResult<()> {
    let (text, cue_dir) = match &cmd.cue_file {
        Some(path) => {
            debug!("reading CUE file: {path:?}");
            (tokio::fs::read_to_string(path).await?, work_dir_of(path))
        }
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            (text, PathBuf::from("."))
        }
    };

    let cache = WavFileCache::new(&cue_dir).await?;
    let mut parser = CueParser::new(&cache, !cmd.allow_missing_wav);
    let mut cd = parser.parse(&text)?;

    if let Some(samples) = cmd.offset_correction.filter(|s| *s != 0) {
        info!("correcting WAV offset by {samples} samples");
        cd.apply_wav_offset(&pb, samples, cmd.use_temp)?;
    }

    write_toc(&cd, cmd.output.as_deref()).await
}

/// Builds a TOC from a WAV file list.
pub async fn convert_wavs(pb: MultiProgress, cmd: WaveCommand) -> CuetocResult<()> {
    let wav_dir = cmd
        .wav_files
        .first()
        .map(|path| work_dir_of(path))
        .unwrap_or_else(|| PathBuf::from("."));
    let names: Vec<String> = cmd
        .wav_files
        .iter()
        .map(|path| path.display().to_string())
        .collect();

    let cache = WavFileCache::new(&wav_dir).await?;
    let mut parser = WavParser::new(&cache, !cmd.allow_missing_wav);
    let mut cd = parser.parse(&names)?;

    if let Some(samples) = cmd.offset_correction.filter(|s| *s != 0) {
        info!("correcting WAV offset by {samples} samples");
        cd.apply_wav_offset(&pb, samples, cmd.use_temp)?;
    }

    write_toc(&cd, cmd.output.as_deref()).await
}

fn work_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

async fn write_toc(cd: &CdData, output: Option<&Path>) -> CuetocResult<()> {
    let mut out = format!(
        "// Generated by {} {}\n",
        crate::built_info::PKG_NAME,
        crate::built_info::PKG_VERSION
    );
    for line in cd.toc() {
        out.push_str(&line);
        out.push('\n');
    }
    match output {
        Some(path) => {
            debug!("writing TOC file: {path:?}");
            tokio::fs::write(path, out).await?;
        }
        None => print!("{out}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{DiscMode, IndexCommand};

    /// WAV lookups backed by fixed maps, standing in for the file system.
    struct StubWavSource {
        files: HashMap<String, PathBuf>,
        lengths: HashMap<PathBuf, TrackTime>,
    }

    impl StubWavSource {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            let mut files = HashMap::new();
            let mut lengths = HashMap::new();
            for (name, path, length) in entries {
                files.insert(name.to_string(), PathBuf::from(path));
                lengths.insert(
                    PathBuf::from(path),
                    TrackTime::parse(length).unwrap(),
                );
            }
            Self { files, lengths }
        }
    }

    impl WavSource for StubWavSource {
        fn locate(&self, name: &str) -> CuetocResult<PathBuf> {
            self.files
                .get(name)
                .cloned()
                .ok_or_else(|| CuetocError::FileNotFound(name.to_string()))
        }

        fn duration(&self, path: &Path) -> Option<TrackTime> {
            self.lengths.get(path).copied()
        }
    }

    fn time(text: &str) -> TrackTime {
        TrackTime::parse(text).unwrap()
    }

    fn parse(wav: &StubWavSource, text: &str) -> CuetocResult<CdData> {
        CueParser::new(wav, true).parse(text)
    }

    const TWO_TRACKS: &str = r#"REM GENRE Rock
REM DATE 1999
REM DISCID 8B0A450C
PERFORMER "Artist"
TITLE "Album"
CATALOG 1234567890123
FILE "one.wav" WAVE
  TRACK 01 AUDIO
    TITLE "First"
    PERFORMER "Artist"
    INDEX 01 00:00:00
FILE "two.wav" WAVE
  TRACK 02 AUDIO
    TITLE "Second"
    ISRC USABC0100002
    FLAGS DCP PRE
    INDEX 01 00:00:00
"#;

    fn stub() -> StubWavSource {
        StubWavSource::new(&[
            ("one.wav", "/music/one.wav", "03:00:00"),
            ("two.wav", "/music/two.wav", "04:30:00"),
        ])
    }

    #[test]
    fn parses_disc_and_track_info() {
        let wav = stub();
        let cd = parse(&wav, TWO_TRACKS).unwrap();
        assert_eq!(cd.disc.genre.as_deref(), Some("Rock"));
        assert_eq!(cd.disc.date.as_deref(), Some("1999"));
        assert_eq!(cd.disc.discid.as_deref(), Some("8B0A450C"));
        assert_eq!(cd.disc.performer.as_deref(), Some("Artist"));
        assert_eq!(cd.disc.title.as_deref(), Some("Album"));
        assert_eq!(cd.disc.catalog.as_deref(), Some("1234567890123"));
        assert_eq!(cd.disc.mode(), DiscMode::CdDa);

        assert_eq!(cd.tracks.len(), 2);
        assert_eq!(cd.tracks[0].title.as_deref(), Some("First"));
        assert_eq!(cd.tracks[1].isrc.as_deref(), Some("USABC0100002"));
        assert!(cd.tracks[1].dcp);
        assert!(cd.tracks[1].pre);
        assert!(!cd.tracks[1].four_ch);
        assert_eq!(cd.files.len(), 2);
    }

    #[test]
    fn index_length_defaults_to_rest_of_file() {
        let wav = stub();
        let cd = parse(&wav, TWO_TRACKS).unwrap();
        assert_eq!(
            cd.tracks[0].indexes[0].cmd,
            IndexCommand::Audio {
                time: time("00:00:00"),
                length: Some(time("03:00:00")),
            }
        );
    }

    #[test]
    fn toc_output_for_a_simple_cue() {
        let wav = stub();
        let cd = parse(&wav, TWO_TRACKS).unwrap();
        let toc = cd.toc();
        assert_eq!(toc[0], "CD_DA");
        assert_eq!(toc[1], "CATALOG \"1234567890123\"");
        assert!(toc.contains(&"//Track 1".to_string()));
        assert!(toc.contains(&"TRACK AUDIO".to_string()));
        assert!(
            toc.contains(&"    AUDIOFILE \"/music/one.wav\" 00:00:00 03:00:00".to_string())
        );
        assert!(
            toc.contains(&"    AUDIOFILE \"/music/two.wav\" 00:00:00 04:30:00".to_string())
        );
    }

    #[test]
    fn pregap_in_its_own_file() {
        let wav = StubWavSource::new(&[
            ("gap.wav", "/music/gap.wav", "00:02:00"),
            ("one.wav", "/music/one.wav", "03:00:00"),
        ]);
        let text = r#"FILE "gap.wav" WAVE
TRACK 01 AUDIO
INDEX 00 00:00:00
FILE "one.wav" WAVE
INDEX 01 00:00:00
"#;
        let cd = parse(&wav, text).unwrap();
        let indexes = &cd.tracks[0].indexes;
        assert!(matches!(indexes[0].cmd, IndexCommand::PreAudio { .. }));
        assert!(matches!(indexes[1].cmd, IndexCommand::Audio { .. }));
    }

    #[test]
    fn pregap_sharing_the_track_file() {
        let wav = StubWavSource::new(&[("one.wav", "/music/one.wav", "03:00:00")]);
        let text = r#"FILE "one.wav" WAVE
TRACK 01 AUDIO
INDEX 00 00:00:00
INDEX 01 00:02:00
"#;
        let cd = parse(&wav, text).unwrap();
        assert_eq!(
            cd.tracks[0].indexes[1].cmd,
            IndexCommand::Start {
                length: time("00:02:00")
            }
        );
    }

    #[test]
    fn tracks_sharing_one_file_truncate_the_first() {
        let wav = StubWavSource::new(&[("one.wav", "/music/one.wav", "06:00:00")]);
        let text = r#"FILE "one.wav" WAVE
TRACK 01 AUDIO
INDEX 01 00:00:00
TRACK 02 AUDIO
INDEX 01 00:03:00
"#;
        let cd = parse(&wav, text).unwrap();
        assert_eq!(
            cd.tracks[0].indexes[0].cmd,
            IndexCommand::Audio {
                time: time("00:00:00"),
                length: Some(time("00:03:00")),
            }
        );
    }

    #[test]
    fn data_track_flips_disc_to_multisession_and_emits_nothing() {
        let wav = stub();
        let text = r#"FILE "one.wav" WAVE
TRACK 01 AUDIO
INDEX 01 00:00:00
FILE "two.wav" WAVE
TRACK 02 MODE1/2352
INDEX 01 00:00:00
"#;
        let cd = parse(&wav, text).unwrap();
        assert_eq!(cd.disc.mode(), DiscMode::CdRomXa);
        assert!(cd.tracks[1].is_data);
        let toc = cd.toc();
        assert_eq!(toc[0], "CD_ROM_XA");
        assert!(!toc.iter().any(|l| l.contains("Track 2")));
        assert!(!toc.iter().any(|l| l.contains("two.wav")));
    }

    #[test]
    fn pregap_command_is_parsed_as_a_time() {
        let wav = stub();
        let text = r#"FILE "one.wav" WAVE
TRACK 01 AUDIO
PREGAP 00:02:00
INDEX 01 00:00:00
"#;
        let cd = parse(&wav, text).unwrap();
        assert_eq!(cd.tracks[0].pregap, Some(time("00:02:00")));
    }

    #[test]
    fn unknown_flags_are_ignored() {
        let wav = stub();
        let text = r#"FILE "one.wav" WAVE
TRACK 01 AUDIO
FLAGS DCP 4CH SCMS
INDEX 01 00:00:00
"#;
        let cd = parse(&wav, text).unwrap();
        assert!(cd.tracks[0].dcp);
        assert!(cd.tracks[0].four_ch);
    }

    #[test]
    fn bad_disc_line_names_the_offender() {
        let wav = stub();
        let text = "GARBAGE LINE HERE\nFILE \"one.wav\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00\n";
        match parse(&wav, text) {
            Err(CuetocError::ParseError(line)) => assert_eq!(line, "GARBAGE LINE HERE"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn unknown_disc_keyword_is_rejected() {
        let wav = stub();
        let text = "SONGWRITER \"X\"\nFILE \"one.wav\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00\n";
        assert!(matches!(
            parse(&wav, text),
            Err(CuetocError::UnknownKeyword(_))
        ));
    }

    #[test]
    fn comments_only_input_is_empty() {
        let wav = stub();
        let text = "REM COMMENT ExactAudioCopy v0.99pb4\nREM COMMENT more\n";
        assert!(matches!(parse(&wav, text), Err(CuetocError::EmptyCue)));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let wav = stub();
        let text = "\nFILE \"one.wav\" WAVE\n\nTRACK 01 AUDIO\n\nINDEX 01 00:00:00\n";
        assert!(parse(&wav, text).is_ok());
    }

    #[test]
    fn out_of_order_track_numbers_are_rejected() {
        let wav = stub();
        let text = "FILE \"one.wav\" WAVE\nTRACK 02 AUDIO\nINDEX 01 00:00:00\n";
        assert!(matches!(
            parse(&wav, text),
            Err(CuetocError::TrackOutOfOrder(_))
        ));
    }

    #[test]
    fn input_without_tracks_is_rejected() {
        let wav = stub();
        let text = "FILE \"one.wav\" WAVE\n";
        assert!(matches!(parse(&wav, text), Err(CuetocError::NoTracks)));
    }

    #[test]
    fn track_without_a_preceding_file_is_rejected() {
        let wav = stub();
        let text = "TRACK 01 AUDIO\nINDEX 01 00:00:00\n";
        assert!(matches!(parse(&wav, text), Err(CuetocError::NoFileContext)));
    }

    #[test]
    fn track_without_index_is_rejected() {
        let wav = stub();
        let text = "FILE \"one.wav\" WAVE\nTRACK 01 AUDIO\nTITLE \"First\"\n";
        assert!(matches!(
            parse(&wav, text),
            Err(CuetocError::NoTrackIndex(1))
        ));
    }

    #[test]
    fn missing_wav_is_fatal_by_default() {
        let wav = stub();
        let text = "FILE \"absent.wav\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00\n";
        assert!(matches!(
            parse(&wav, text),
            Err(CuetocError::FileNotFound(_))
        ));
    }

    #[test]
    fn missing_wav_is_kept_verbatim_when_tolerated() {
        let wav = stub();
        let text = "FILE \"absent.wav\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00\n";
        let cd = CueParser::new(&wav, false).parse(text).unwrap();
        let idx = &cd.tracks[0].indexes[0];
        assert_eq!(idx.file, PathBuf::from("absent.wav"));
        // unmeasurable file: no length default applies
        assert_eq!(
            idx.cmd,
            IndexCommand::Audio {
                time: time("00:00:00"),
                length: None,
            }
        );
    }

    #[test]
    fn wav_list_builds_one_track_per_file() {
        let wav = stub();
        let mut parser = WavParser::new(&wav, true);
        let cd = parser
            .parse(&["one.wav".to_string(), "two.wav".to_string()])
            .unwrap();
        assert_eq!(cd.tracks.len(), 2);
        assert_eq!(cd.tracks[0].num, 1);
        assert_eq!(cd.tracks[1].num, 2);
        assert_eq!(
            cd.tracks[1].indexes[0].cmd,
            IndexCommand::Audio {
                time: time("00:00:00"),
                length: Some(time("04:30:00")),
            }
        );
    }
}
