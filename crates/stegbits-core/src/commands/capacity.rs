use std::path::Path;

use crate::{BitDepth, CodecOptions, OperationResult};

pub fn capacity(media: &Path, depth: u8, options: CodecOptions) -> OperationResult {
    let options = match BitDepth::new(depth) {
        Ok(depth) => options.with_depth(depth),
        Err(e) => return e.into(),
    };

    match crate::api::capacity::of(media, &options) {
        Ok(capacity) => OperationResult::success(
            format!(
                "{} can hide up to {} bytes at bit depth {}",
                media.display(),
                capacity.max_payload_bytes(),
                capacity.depth
            ),
            None,
        ),
        Err(e) => e.into(),
    }
}
