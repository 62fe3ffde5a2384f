use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, Frame, ImageError};
use log::{debug, info};

use crate::bits::{channels, channels_mut, embed, BitChunks, ChannelOrder, LsbReader};
use crate::media::{output_file, CodecOptions, LsbCodec, Persist};
use crate::payload::{frame, read_framed};
use crate::{BitDepth, Capacity, Result, StegError};

/// a single GIF frame can reference at most this many colors
pub const MAX_FRAME_COLORS: usize = 256;

/// The frames of an animated GIF, each one fully composed onto the canvas.
///
/// The bit stream runs through all frames in order, row major, R,G,B per
/// pixel. Alpha is not a carrier.
pub struct Animation {
    frames: Vec<Frame>,
}

impl Animation {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| StegError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let frames = GifDecoder::new(reader)?.into_frames().collect_frames()?;
        debug!("decoded {} gif frames", frames.len());

        Ok(Self { frames })
    }

    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn capacity(&self, depth: BitDepth) -> Capacity {
        let pixels = self
            .frames
            .iter()
            .map(|f| {
                let (w, h) = f.buffer().dimensions();
                w as u64 * h as u64
            })
            .sum();

        Capacity::new(pixels, 3, depth)
    }

    /// hides already framed data, frames are made fully opaque on the way
    pub fn hide(&mut self, framed: &[u8], depth: BitDepth) -> usize {
        for f in self.frames.iter_mut() {
            f.buffer_mut().pixels_mut().for_each(|p| p.0[3] = u8::MAX);
        }

        let mut chunks = BitChunks::new(framed, depth);
        embed(
            self.frames
                .iter_mut()
                .flat_map(|f| channels_mut(&mut **f.buffer_mut(), 4, ChannelOrder::Rgb)),
            &mut chunks,
            depth,
        )
    }

    pub fn reader(&self, depth: BitDepth) -> LsbReader<impl Iterator<Item = u8> + '_> {
        LsbReader::new(
            self.frames
                .iter()
                .flat_map(|f| channels(&**f.buffer(), 4, ChannelOrder::Rgb)),
            depth,
        )
    }

    /// Every frame has to fit into a 256 color palette, otherwise the GIF
    /// encoder would quantize and destroy the hidden bits.
    pub fn check_palette(&self) -> Result<()> {
        for (i, f) in self.frames.iter().enumerate() {
            let colors = f
                .buffer()
                .pixels()
                .map(|p| [p.0[0], p.0[1], p.0[2]])
                .collect::<HashSet<_>>()
                .len();
            if colors > MAX_FRAME_COLORS {
                return Err(StegError::PaletteExhausted { frame: i, colors });
            }
        }

        Ok(())
    }
}

impl Persist for Animation {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|source| {
            log::error!("Error creating file {file:?}: {source}");
            StegError::WriteError {
                path: file.to_path_buf(),
                source,
            }
        })?;

        let mut encoder = GifEncoder::new(BufWriter::new(f));
        encoder.set_repeat(Repeat::Infinite)?;
        encoder
            .encode_frames(
                self.frames
                    .iter()
                    .map(|f| Frame::from_parts(f.buffer().clone(), f.left(), f.top(), f.delay())),
            )
            .map_err(|e| match e {
                ImageError::IoError(source) => StegError::WriteError {
                    path: file.to_path_buf(),
                    source,
                },
                other => other.into(),
            })
    }
}

/// LSB codec for animated GIF images
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimatedImageCodec;

impl LsbCodec for AnimatedImageCodec {
    fn capacity(&self, media: &Path, opts: &CodecOptions) -> Result<Capacity> {
        Ok(Animation::open(media)?.capacity(opts.depth))
    }

    fn hide(
        &self,
        cover: &Path,
        payload: &[u8],
        output_dir: &Path,
        opts: &CodecOptions,
    ) -> Result<PathBuf> {
        let target = output_file(output_dir, "stego_gif.gif")?;
        let mut animation = Animation::open(cover)?;
        animation.capacity(opts.depth).ensure_fits(payload.len())?;

        let written = animation.hide(&frame(payload)?, opts.depth);
        animation.check_palette()?;
        info!(
            "hid {} bytes in {written} color channels over {} frames",
            payload.len(),
            animation.frames.len()
        );
        animation.save_as(&target)?;

        Ok(target)
    }

    fn unveil(&self, secret: &Path, opts: &CodecOptions) -> Result<Vec<u8>> {
        let animation = Animation::open(secret)?;
        let payload = read_framed(&mut animation.reader(opts.depth));
        payload
    }
}
