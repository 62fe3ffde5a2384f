use std::path::Path;

use crate::{BitDepth, CodecOptions, OperationResult, Result};

pub fn hide(
    cover: &Path,
    payload: &[u8],
    depth: u8,
    output_folder: &Path,
    options: CodecOptions,
) -> OperationResult {
    match run(cover, payload, depth, output_folder, options) {
        Ok(stego) => OperationResult::success(
            format!("Stego file created successfully at {}", stego.display()),
            Some(stego),
        ),
        Err(e) => e.into(),
    }
}

fn run(
    cover: &Path,
    payload: &[u8],
    depth: u8,
    output_folder: &Path,
    options: CodecOptions,
) -> Result<std::path::PathBuf> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_depth(BitDepth::new(depth)?)
        .with_cover(cover)
        .with_payload(payload)
        .into_output_folder(output_folder)
        .execute()
}
