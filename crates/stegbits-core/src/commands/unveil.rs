use std::path::Path;

use crate::api::unveil::Unveiled;
use crate::{BitDepth, CodecOptions, OperationResult, Result};

/// Writes `decoded_message.txt` into `output_folder` when one is given
pub fn unveil(
    secret_media: &Path,
    depth: u8,
    output_folder: Option<&Path>,
    options: CodecOptions,
) -> OperationResult {
    match run(secret_media, depth, output_folder, options) {
        Ok(Unveiled {
            message_file: Some(file),
            ..
        }) => OperationResult::success(
            format!("Check {} for the decoded message.", file.display()),
            Some(file),
        ),
        Ok(unveiled) => OperationResult::success(
            format!("Decoded message: {}", unveiled.text()),
            None,
        ),
        Err(e) => e.into(),
    }
}

fn run(
    secret_media: &Path,
    depth: u8,
    output_folder: Option<&Path>,
    options: CodecOptions,
) -> Result<Unveiled> {
    let mut api = crate::api::unveil::prepare()
        .with_options(options)
        .with_depth(BitDepth::new(depth)?)
        .from_secret_file(secret_media);
    if let Some(folder) = output_folder {
        api = api.into_output_folder(folder);
    }

    api.execute()
}
