//! Framing of the hidden payload.
//!
//! Every medium carries the same layout:
//!
//! ```text
//! | 'S' 'B' | length: u32 big endian | payload bytes ... |
//! ```
//!
//! The explicit length replaces any in-band sentinel, so payload bytes can
//! take any value.

use std::io::{ErrorKind, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::StegError;

pub const MAGIC: [u8; 2] = *b"SB";

/// magic plus length field
pub const HEADER_LEN: usize = MAGIC.len() + 4;

/// prepends the header to `payload`
pub fn frame(payload: &[u8]) -> Result<Vec<u8>, StegError> {
    let len = u32::try_from(payload.len()).map_err(|_| StegError::CapacityExceeded {
        needed: payload.len(),
        available: u32::MAX as usize,
    })?;
    let mut framed = Vec::with_capacity(HEADER_LEN + payload.len());
    framed.write_all(&MAGIC)?;
    framed.write_u32::<BigEndian>(len)?;
    framed.write_all(payload)?;

    Ok(framed)
}

/// Reads one framed payload, `NoSecretData` if there is no valid header.
///
/// A medium that ends before the announced length yields the bytes read so
/// far.
pub fn read_framed<R: Read>(reader: &mut R) -> Result<Vec<u8>, StegError> {
    let (len, payload) = read_frame(reader)?;
    if (payload.len() as u64) < len {
        log::warn!(
            "header announces {len} bytes but the medium ended after {}, returning those",
            payload.len()
        );
    }

    Ok(payload)
}

/// Like [`read_framed`], but a payload cut short is `NoSecretData` as well.
pub fn read_complete_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>, StegError> {
    let (len, payload) = read_frame(reader)?;
    if (payload.len() as u64) < len {
        log::debug!(
            "header announces {len} bytes but the medium ended after {}",
            payload.len()
        );
        return Err(StegError::NoSecretData);
    }

    Ok(payload)
}

/// announced length and the payload bytes actually present
fn read_frame<R: Read>(reader: &mut R) -> Result<(u64, Vec<u8>), StegError> {
    let mut magic = [0; MAGIC.len()];
    reader.read_exact(&mut magic).map_err(eof_as_missing)?;
    if magic != MAGIC {
        log::debug!("magic mismatch, found {magic:02x?}");
        return Err(StegError::NoSecretData);
    }
    let len = reader.read_u32::<BigEndian>().map_err(eof_as_missing)? as u64;

    let mut payload = Vec::new();
    reader.take(len).read_to_end(&mut payload)?;

    Ok((len, payload))
}

fn eof_as_missing(e: std::io::Error) -> StegError {
    if e.kind() == ErrorKind::UnexpectedEof {
        StegError::NoSecretData
    } else {
        StegError::IoError(e)
    }
}
