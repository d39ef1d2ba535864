use crate::error::{CuetocError, CuetocResult};
use binrw::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// RIFF chunk header: four byte id followed by the chunk's byte size.
#[derive(Debug, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
struct ChunkHeader {
    id: [u8; 4],
    size: u32,
}

/// Body of the canonical 16-byte 'fmt ' chunk.
#[derive(Debug, Clone, Copy, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct WavFormat {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

/// Reads WAV sample data through the RIFF chunk structure. Unknown chunks
/// are skipped; odd-sized chunks are padded per the RIFF rules.
pub struct WavReader {
    reader: BufReader<File>,
    pub format: WavFormat,
    data_size: u32,
    data_start: u64,
    remaining: u32,
}

impl WavReader {
    pub fn open(path: &Path) -> CuetocResult<Self> {
        let invalid = || CuetocError::InvalidWavHeader(path.to_path_buf());
        let mut reader = BufReader::new(File::open(path)?);

        let riff = ChunkHeader::read(&mut reader)?;
        if &riff.id != b"RIFF" {
            return Err(invalid());
        }
        let mut wave_id = [0u8; 4];
        reader.read_exact(&mut wave_id)?;
        if &wave_id != b"WAVE" {
            return Err(invalid());
        }

        let mut format: Option<WavFormat> = None;
        while let Ok(chunk) = ChunkHeader::read(&mut reader) {
            match &chunk.id {
                b"fmt " => {
                    format = Some(WavFormat::read(&mut reader)?);
                    // non-canonical fmt chunks carry extension bytes
                    if chunk.size > 16 {
                        reader.seek(SeekFrom::Current((chunk.size - 16) as i64))?;
                    }
                }
                b"data" => {
                    let format = format.ok_or_else(invalid)?;
                    if format.block_align == 0 || format.sample_rate < 75 {
                        return Err(invalid());
                    }
                    let data_start = reader.stream_position()?;
                    return Ok(Self {
                        reader,
                        format,
                        data_size: chunk.size,
                        data_start,
                        remaining: chunk.size,
                    });
                }
                _ => {
                    reader.seek(SeekFrom::Current(chunk.size as i64))?;
                }
            }
            // chunks are word aligned
            if chunk.size % 2 == 1 {
                reader.seek(SeekFrom::Current(1))?;
            }
        }
        Err(invalid())
    }

    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    pub fn sample_count(&self) -> u32 {
        self.data_size / self.format.block_align as u32
    }

    /// Audio length in CD frames (1/75th second units).
    pub fn cd_frames(&self) -> u32 {
        self.sample_count() / (self.format.sample_rate / 75)
    }

    pub fn bytes_per_sample(&self) -> u32 {
        self.format.block_align as u32
    }

    /// Positions the next read at the given sample.
    pub fn seek_sample(&mut self, sample: u32) -> CuetocResult<()> {
        let byte = sample as u64 * self.bytes_per_sample() as u64;
        self.reader.seek(SeekFrom::Start(self.data_start + byte))?;
        self.remaining = self.data_size.saturating_sub(byte as u32);
        Ok(())
    }

    /// Reads sample data into `buf`, never past the end of the data chunk.
    /// Returns the number of bytes read; zero at the end of the audio data.
    pub fn read_samples(&mut self, buf: &mut [u8]) -> CuetocResult<usize> {
        let want = buf.len().min(self.remaining as usize);
        if want == 0 {
            return Ok(0);
        }
        self.reader.read_exact(&mut buf[..want])?;
        self.remaining -= want as u32;
        Ok(want)
    }
}

/// Writes a canonical WAV file. The output length is known up front, so the
/// complete header goes out first and is never patched.
pub struct WavWriter {
    writer: BufWriter<File>,
}

impl WavWriter {
    pub fn create(path: &Path, format: WavFormat, data_size: u32) -> CuetocResult<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        ChunkHeader {
            id: *b"RIFF",
            size: 36 + data_size,
        }
        .write(&mut writer)?;
        writer.write_all(b"WAVE")?;
        ChunkHeader {
            id: *b"fmt ",
            size: 16,
        }
        .write(&mut writer)?;
        format.write(&mut writer)?;
        ChunkHeader {
            id: *b"data",
            size: data_size,
        }
        .write(&mut writer)?;
        Ok(Self { writer })
    }

    pub fn write_samples(&mut self, data: &[u8]) -> CuetocResult<()> {
        self.writer.write_all(data)?;
        Ok(())
    }

    pub fn finish(mut self) -> CuetocResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
