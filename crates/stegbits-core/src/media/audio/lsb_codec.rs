use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::info;

use crate::bits::{embed, BitChunks, LsbReader};
use crate::media::{extension_or, output_file, CodecOptions, LsbCodec, Persist};
use crate::payload::{frame, read_framed};
use crate::{BitDepth, Capacity, Result, StegError};

/// PCM audio as the raw little endian frame bytes of a WAV file, plus the
/// parameters needed to write it back unchanged.
///
/// Every byte is a carrier, the sample structure is not taken into account.
#[derive(Debug, Clone)]
pub struct PcmAudio {
    spec: WavSpec,
    bytes: Vec<u8>,
}

impl PcmAudio {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| StegError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(WavReader::new(BufReader::new(file))?)
    }

    pub fn from_reader<R: Read>(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        let bytes = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 8) => reader
                .into_samples::<i8>()
                .map(|s| s.map(|s| (s as u8) ^ 0x80))
                .collect::<std::result::Result<Vec<_>, _>>()?,
            (SampleFormat::Int, 16) => flatten(reader.into_samples::<i16>(), i16::to_le_bytes)?,
            (SampleFormat::Int, 24) => {
                flatten(reader.into_samples::<i32>(), |s: i32| {
                    let [b0, b1, b2, _] = s.to_le_bytes();
                    [b0, b1, b2]
                })?
            }
            (SampleFormat::Int, 32) => flatten(reader.into_samples::<i32>(), i32::to_le_bytes)?,
            (SampleFormat::Float, 32) => flatten(reader.into_samples::<f32>(), f32::to_le_bytes)?,
            (format, bits) => {
                return Err(StegError::UnsupportedMedia(format!(
                    "{bits} bit {format:?} WAV samples"
                )))
            }
        };

        Ok(Self { spec, bytes })
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    pub fn frame_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn capacity(&self, depth: BitDepth) -> Capacity {
        Capacity::new(self.bytes.len() as u64, 1, depth)
    }

    /// hides already framed data, one bit group per frame byte
    pub fn hide(&mut self, framed: &[u8], depth: BitDepth) -> usize {
        let mut chunks = BitChunks::new(framed, depth);
        embed(self.bytes.iter_mut(), &mut chunks, depth)
    }

    pub fn reader(&self, depth: BitDepth) -> LsbReader<impl Iterator<Item = u8> + '_> {
        LsbReader::new(self.bytes.iter().copied(), depth)
    }

    /// writes a complete WAV file with the original parameters
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut wav = WavWriter::new(writer, self.spec)?;
        match (self.spec.sample_format, self.spec.bits_per_sample) {
            (SampleFormat::Int, 8) => {
                for b in &self.bytes {
                    wav.write_sample((b ^ 0x80) as i8)?;
                }
            }
            (SampleFormat::Int, 16) => {
                for s in self.bytes.chunks_exact(2) {
                    wav.write_sample(i16::from_le_bytes([s[0], s[1]]))?;
                }
            }
            (SampleFormat::Int, 24) => {
                for s in self.bytes.chunks_exact(3) {
                    let sign = if s[2] & 0x80 != 0 { 0xFF } else { 0x00 };
                    wav.write_sample(i32::from_le_bytes([s[0], s[1], s[2], sign]))?;
                }
            }
            (SampleFormat::Int, 32) => {
                for s in self.bytes.chunks_exact(4) {
                    wav.write_sample(i32::from_le_bytes([s[0], s[1], s[2], s[3]]))?;
                }
            }
            (SampleFormat::Float, 32) => {
                for s in self.bytes.chunks_exact(4) {
                    wav.write_sample(f32::from_le_bytes([s[0], s[1], s[2], s[3]]))?;
                }
            }
            (format, bits) => {
                return Err(StegError::UnsupportedMedia(format!(
                    "{bits} bit {format:?} WAV samples"
                )))
            }
        }
        wav.finalize()?;

        Ok(())
    }
}

fn flatten<S, I, const N: usize>(samples: I, to_bytes: fn(S) -> [u8; N]) -> Result<Vec<u8>>
where
    I: Iterator<Item = hound::Result<S>>,
{
    let mut bytes = Vec::with_capacity(samples.size_hint().0 * N);
    for sample in samples {
        bytes.extend_from_slice(&to_bytes(sample?));
    }

    Ok(bytes)
}

impl Persist for PcmAudio {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|source| {
            log::error!("Error creating file {file:?}: {source}");
            StegError::WriteError {
                path: file.to_path_buf(),
                source,
            }
        })?;

        self.write_to(BufWriter::new(f))
    }
}

/// LSB codec for PCM WAV audio
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioCodec;

impl LsbCodec for AudioCodec {
    fn capacity(&self, media: &Path, opts: &CodecOptions) -> Result<Capacity> {
        Ok(PcmAudio::open(media)?.capacity(opts.depth))
    }

    fn hide(
        &self,
        cover: &Path,
        payload: &[u8],
        output_dir: &Path,
        opts: &CodecOptions,
    ) -> Result<PathBuf> {
        let ext = extension_or(cover, "wav");
        let target = output_file(output_dir, &format!("encoded_audio.{ext}"))?;
        let mut audio = PcmAudio::open(cover)?;
        audio.capacity(opts.depth).ensure_fits(payload.len())?;

        let written = audio.hide(&frame(payload)?, opts.depth);
        info!(
            "hid {} bytes in {written} of {} frame bytes",
            payload.len(),
            audio.bytes.len()
        );
        audio.save_as(&target)?;

        Ok(target)
    }

    fn unveil(&self, secret: &Path, opts: &CodecOptions) -> Result<Vec<u8>> {
        let audio = PcmAudio::open(secret)?;
        let payload = read_framed(&mut audio.reader(opts.depth));
        payload
    }
}
