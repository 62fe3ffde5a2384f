use std::path::PathBuf;

use clap::Args;
use stegbits_core::{CodecOptions, OperationResult};

/// Unveils a hidden message, the bit depth has to match the one used for hiding
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Stego media that contains the secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Write the message as decoded_message.txt into that folder instead of printing it
    #[arg(short = 'o', long = "out", value_name = "output folder")]
    pub output_folder: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self, depth: u8, options: CodecOptions) -> OperationResult {
        stegbits_core::commands::unveil(&self.media, depth, self.output_folder.as_deref(), options)
    }
}
