use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, RgbImage, RgbaImage};
use log::{info, warn};

use crate::bits::{channels, channels_mut, embed, BitChunks, ChannelOrder, LsbReader};
use crate::media::{extension_or, output_file, CodecOptions, LsbCodec, Persist};
use crate::payload::{frame, read_framed};
use crate::{BitDepth, Capacity, Result, StegError};

/// A raster image as a flat buffer of 8 bit channels.
///
/// Images with an alpha channel keep it, but alpha is never used as carrier.
#[derive(Debug, Clone)]
pub enum Raster {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Raster {
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| match e {
            ImageError::IoError(source) => StegError::ReadError {
                path: path.to_path_buf(),
                source,
            },
            other => other.into(),
        })?;

        Ok(Self::from(img))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Rgb(i) => i.dimensions(),
            Raster::Rgba(i) => i.dimensions(),
        }
    }

    fn stride(&self) -> usize {
        match self {
            Raster::Rgb(_) => 3,
            Raster::Rgba(_) => 4,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Raster::Rgb(i) => &**i,
            Raster::Rgba(i) => &**i,
        }
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Raster::Rgb(i) => &mut **i,
            Raster::Rgba(i) => &mut **i,
        }
    }

    pub fn capacity(&self, depth: BitDepth) -> Capacity {
        let (w, h) = self.dimensions();
        Capacity::new(w as u64 * h as u64, 3, depth)
    }

    /// hides already framed data row by row, R,G,B per pixel
    pub fn hide(&mut self, framed: &[u8], depth: BitDepth) -> usize {
        let stride = self.stride();
        let mut chunks = BitChunks::new(framed, depth);
        embed(
            channels_mut(self.as_bytes_mut(), stride, ChannelOrder::Rgb),
            &mut chunks,
            depth,
        )
    }

    pub fn reader(&self, depth: BitDepth) -> LsbReader<impl Iterator<Item = u8> + '_> {
        LsbReader::new(
            channels(self.as_bytes(), self.stride(), ChannelOrder::Rgb),
            depth,
        )
    }
}

impl From<DynamicImage> for Raster {
    fn from(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            Raster::Rgba(img.to_rgba8())
        } else {
            Raster::Rgb(img.to_rgb8())
        }
    }
}

impl Persist for Raster {
    /// the format follows the file extension
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let saved = match self {
            Raster::Rgb(i) => i.save(file),
            Raster::Rgba(i) => i.save(file),
        };

        saved.map_err(|e| match e {
            ImageError::IoError(source) => StegError::WriteError {
                path: file.to_path_buf(),
                source,
            },
            other => {
                log::error!("Error saving image {file:?}: {other}");
                other.into()
            }
        })
    }
}

/// LSB codec for still images (PNG, JPEG, BMP)
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl LsbCodec for ImageCodec {
    fn capacity(&self, media: &Path, opts: &CodecOptions) -> Result<Capacity> {
        Ok(Raster::open(media)?.capacity(opts.depth))
    }

    fn hide(
        &self,
        cover: &Path,
        payload: &[u8],
        output_dir: &Path,
        opts: &CodecOptions,
    ) -> Result<PathBuf> {
        let ext = extension_or(cover, "png");
        let target = output_file(output_dir, &format!("stego_image.{ext}"))?;
        let mut raster = Raster::open(cover)?;
        raster.capacity(opts.depth).ensure_fits(payload.len())?;

        let written = raster.hide(&frame(payload)?, opts.depth);
        info!("hid {} bytes in {written} color channels", payload.len());

        if is_lossy(&ext) {
            warn!("{target:?} is written with lossy compression, the hidden bits will most likely not survive");
        }
        raster.save_as(&target)?;

        Ok(target)
    }

    fn unveil(&self, secret: &Path, opts: &CodecOptions) -> Result<Vec<u8>> {
        let raster = Raster::open(secret)?;
        let payload = read_framed(&mut raster.reader(opts.depth));
        payload
    }
}

fn is_lossy(ext: &str) -> bool {
    matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg")
}
