//! Video carriers.
//!
//! ffmpeg unpacks the first video stream into PNG frames inside a
//! [`FrameStore`], the frames are treated like still images with the color
//! channels visited as B,G,R, and the mutated frames are packed again into a
//! lossless PNG video stream. An audio track is carried over.

pub mod ffmpeg;
pub mod frame_store;

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{debug, info, warn};

use crate::bits::{channels_mut, embed, BitChunks, ChannelOrder, LsbReader};
use crate::media::{output_file, CodecOptions, LsbCodec};
use crate::payload::{frame, read_complete_frame};
use crate::{BitDepth, Capacity, Result, StegError};

pub use ffmpeg::{Ffmpeg, Geometry};
pub use frame_store::FrameStore;

/// LSB codec for video files, needs `ffmpeg` and `ffprobe`
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoCodec;

impl LsbCodec for VideoCodec {
    fn capacity(&self, media: &Path, opts: &CodecOptions) -> Result<Capacity> {
        let geometry = Ffmpeg::new(&opts.video).geometry(media)?;
        debug!("{media:?}: {geometry:?}");

        Ok(Capacity::new(
            geometry.width as u64 * geometry.height as u64 * geometry.frames,
            3,
            opts.depth,
        ))
    }

    fn hide(
        &self,
        cover: &Path,
        payload: &[u8],
        output_dir: &Path,
        opts: &CodecOptions,
    ) -> Result<PathBuf> {
        let stem = cover
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());
        let target = output_file(output_dir, &format!("{stem}_stego.mp4"))?;

        let tools = Ffmpeg::new(&opts.video);
        let store = FrameStore::new(opts.video.temp_root.as_deref())?;
        let fps = tools.frame_rate(cover)?;
        let has_audio = tools.has_audio(cover)?;
        tools.extract_frames(cover, &store)?;
        let frames = store.frames()?;
        info!("{} frames at {fps} fps, audio: {has_audio}", frames.len());

        frames_capacity(&frames, opts.depth)?.ensure_fits(payload.len())?;
        let framed = frame(payload)?;
        let mutated = hide_in_frames(&frames, &framed, opts.depth)?;
        info!("hid {} bytes in {mutated} frames", payload.len());

        let video_only = store.path().join("video-only.mp4");
        tools.assemble_video(&store, &fps, &video_only)?;

        let muxed = if has_audio {
            let audio = store.path().join("audio.mka");
            tools
                .extract_audio(cover, &audio)
                .and_then(|_| tools.mux(&video_only, &audio, &target))
        } else {
            fs::copy(&video_only, &target)
                .map(|_| ())
                .map_err(|source| StegError::WriteError {
                    path: target.clone(),
                    source,
                })
        };
        if let Err(e) = muxed {
            if target.exists() {
                if let Err(rm) = fs::remove_file(&target) {
                    warn!("could not remove incomplete {target:?}: {rm}");
                }
            }
            return Err(e);
        }

        Ok(release(store, target))
    }

    fn unveil(&self, secret: &Path, opts: &CodecOptions) -> Result<Vec<u8>> {
        let tools = Ffmpeg::new(&opts.video);
        let store = FrameStore::new(opts.video.temp_root.as_deref())?;
        tools.extract_frames(secret, &store)?;
        let frames = store.frames()?;
        debug!("reading from {} frames", frames.len());

        let mut source = FrameChannels::new(&frames);
        let unveiled = read_complete_frame(&mut LsbReader::new(source.by_ref(), opts.depth));
        if let Some(e) = source.error.take() {
            return Err(e);
        }

        unveiled
    }
}

/// Removes the frame store once `target` is complete. A failed removal only
/// gets logged, the stego video is kept.
fn release(store: FrameStore, target: PathBuf) -> PathBuf {
    if let Err(e) = store.close() {
        warn!("{target:?} is complete but the frame store is left behind: {e}");
    }

    target
}

/// width * height * 3 channels, summed over all frames
fn frames_capacity(frames: &[PathBuf], depth: BitDepth) -> Result<Capacity> {
    let mut pixels = 0u64;
    for path in frames {
        let (w, h) = image::image_dimensions(path)?;
        pixels += w as u64 * h as u64;
    }

    Ok(Capacity::new(pixels, 3, depth))
}

/// Rewrites frames in order until the bit stream is exhausted, frames after
/// that stay untouched. Returns the number of rewritten frames.
fn hide_in_frames(frames: &[PathBuf], framed: &[u8], depth: BitDepth) -> Result<usize> {
    let mut chunks = BitChunks::new(framed, depth);
    let mut mutated = 0;

    for path in frames {
        if chunks.len() == 0 {
            break;
        }
        let mut img = open_frame(path)?;
        embed(
            channels_mut(&mut img, 3, ChannelOrder::Bgr),
            &mut chunks,
            depth,
        );
        img.save(path)?;
        mutated += 1;
    }

    Ok(mutated)
}

fn open_frame(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Color channels of all frames in B,G,R order, frames are loaded lazily.
///
/// Iteration stops at the first frame that cannot be loaded, the cause is
/// kept in `error`.
struct FrameChannels<'a> {
    frames: std::slice::Iter<'a, PathBuf>,
    current: Vec<u8>,
    pos: usize,
    error: Option<StegError>,
}

impl<'a> FrameChannels<'a> {
    fn new(frames: &'a [PathBuf]) -> Self {
        Self {
            frames: frames.iter(),
            current: Vec::new(),
            pos: 0,
            error: None,
        }
    }

    fn load_next(&mut self) -> Option<()> {
        let path = self.frames.next()?;
        match open_frame(path) {
            Ok(img) => {
                let mut bytes = img.into_raw();
                bytes.chunks_exact_mut(3).for_each(|px| px.swap(0, 2));
                self.current = bytes;
                self.pos = 0;
                Some(())
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl Iterator for FrameChannels<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos >= self.current.len() {
            if self.error.is_some() {
                return None;
            }
            self.load_next()?;
        }
        let byte = self.current[self.pos];
        self.pos += 1;

        Some(byte)
    }
}
