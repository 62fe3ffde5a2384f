use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::media::output_file;
use crate::{BitDepth, Codec, CodecOptions, LsbCodec, Result, StegError};

/// name of the file the payload is written to, if an output folder is given
pub const DECODED_MESSAGE_FILE: &str = "decoded_message.txt";

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

/// The recovered payload
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Unveiled {
    pub payload: Vec<u8>,

    /// where the payload was written to, if it was
    pub message_file: Option<PathBuf>,
}

impl Unveiled {
    /// the payload as text, invalid UTF-8 sequences are replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options, this replaces a depth set before
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Has to be the depth the payload was hidden with
    pub fn with_depth(mut self, depth: BitDepth) -> Self {
        self.options.depth = depth;
        self
    }

    /// This is the stego file that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_media: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_media.as_ref().to_path_buf());
        self
    }

    /// Also write the payload to `decoded_message.txt` in this folder
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<Unveiled> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegError::CarrierNotSet);
        };

        let payload = Codec::for_path(&secret_media)?.unveil(&secret_media, &self.options)?;
        info!("unveiled {} bytes from {secret_media:?}", payload.len());

        let message_file = match self.output_folder {
            Some(folder) => {
                let file = output_file(&folder, DECODED_MESSAGE_FILE)?;
                fs::write(&file, &payload).map_err(|source| StegError::WriteError {
                    path: file.clone(),
                    source,
                })?;
                Some(file)
            }
            None => None,
        };

        Ok(Unveiled {
            payload,
            message_file,
        })
    }
}
