use std::path::Path;

use log::info;

use crate::{Capacity, Codec, CodecOptions, LsbCodec, Result};

/// How many payload bytes `media` can take at `options.depth`
pub fn of(media: impl AsRef<Path>, options: &CodecOptions) -> Result<Capacity> {
    let media = media.as_ref();
    let capacity = Codec::for_path(media)?.capacity(media, options)?;
    info!(
        "{media:?} holds {} payload bytes at depth {}",
        capacity.max_payload_bytes(),
        capacity.depth
    );

    Ok(capacity)
}
