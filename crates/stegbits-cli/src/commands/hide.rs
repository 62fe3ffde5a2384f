use std::path::PathBuf;

use clap::Args;
use stegbits_core::{CodecOptions, OperationResult, StegError};

/// Hides a message or a file in an image, GIF, WAV audio or video file
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Cover media such as PNG image, GIF, WAV audio or MP4 video, used readonly
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Existing folder the stego file is written to
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output folder",
        required = true
    )]
    pub output_folder: PathBuf,

    /// File whose content will be hidden
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data file",
        required_unless_present = "message",
        conflicts_with = "message"
    )]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,
}

impl HideArgs {
    pub fn run(self, depth: u8, options: CodecOptions) -> OperationResult {
        let payload = match (self.message, self.data_file) {
            (Some(message), _) => message.into_bytes(),
            (None, Some(file)) => match std::fs::read(&file) {
                Ok(bytes) => bytes,
                Err(source) => return StegError::ReadError { path: file, source }.into(),
            },
            (None, None) => return StegError::MissingPayload.into(),
        };

        stegbits_core::commands::hide(&self.media, &payload, depth, &self.output_folder, options)
    }
}
