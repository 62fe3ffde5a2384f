use std::path::PathBuf;

use clap::Args;
use stegbits_core::{CodecOptions, OperationResult};

/// Shows how many bytes a cover media can hide at the given bit depth
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Cover media to inspect
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, depth: u8, options: CodecOptions) -> OperationResult {
        stegbits_core::commands::capacity(&self.media, depth, options)
    }
}
