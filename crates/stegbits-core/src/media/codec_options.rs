use std::env;
use std::path::PathBuf;

use crate::BitDepth;

pub const FFMPEG_ENV: &str = "STEGBITS_FFMPEG";
pub const FFPROBE_ENV: &str = "STEGBITS_FFPROBE";
pub const TMPDIR_ENV: &str = "STEGBITS_TMPDIR";

/// Codec configuration shared by all media kinds
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Number of low bits per carrier byte that hold payload.
    /// Encoding and decoding must use the same depth.
    pub depth: BitDepth,

    /// Only consulted for video carriers
    pub video: VideoOptions,
}

impl CodecOptions {
    pub fn with_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_video(mut self, video: VideoOptions) -> Self {
        self.video = video;
        self
    }
}

/// Where to find the transcoding tools and where frames are staged
#[derive(Debug, Clone)]
pub struct VideoOptions {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,

    /// Parent of the per-operation frame directory, the system temp dir if `None`
    pub temp_root: Option<PathBuf>,
}

impl Default for VideoOptions {
    /// Takes `STEGBITS_FFMPEG`, `STEGBITS_FFPROBE` and `STEGBITS_TMPDIR` into account
    fn default() -> Self {
        Self {
            ffmpeg: env::var_os(FFMPEG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("ffmpeg")),
            ffprobe: env::var_os(FFPROBE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("ffprobe")),
            temp_root: env::var_os(TMPDIR_ENV).map(PathBuf::from),
        }
    }
}

impl VideoOptions {
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    pub fn with_ffprobe(mut self, ffprobe: impl Into<PathBuf>) -> Self {
        self.ffprobe = ffprobe.into();
        self
    }

    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(temp_root.into());
        self
    }
}
