use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stegbits_core::{CodecOptions, VideoOptions};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Number of least significant bits per color channel or audio byte, 1 to 8
    #[arg(long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub depth: u8,

    /// ffmpeg executable used for videos [env: STEGBITS_FFMPEG]
    #[arg(long, global = true, value_name = "path")]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe executable used for videos [env: STEGBITS_FFPROBE]
    #[arg(long, global = true, value_name = "path")]
    pub ffprobe: Option<PathBuf>,

    /// Folder for temporary video frames [env: STEGBITS_TMPDIR]
    #[arg(long, global = true, value_name = "folder")]
    pub temp_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

impl CliArgs {
    /// command line flags win over the environment
    pub fn codec_options(&self) -> CodecOptions {
        let mut video = VideoOptions::default();
        if let Some(ffmpeg) = &self.ffmpeg {
            video = video.with_ffmpeg(ffmpeg);
        }
        if let Some(ffprobe) = &self.ffprobe {
            video = video.with_ffprobe(ffprobe);
        }
        if let Some(temp_dir) = &self.temp_dir {
            video = video.with_temp_root(temp_dir);
        }

        CodecOptions::default().with_video(video)
    }
}
