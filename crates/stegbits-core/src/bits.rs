//! Bit level building blocks shared by all codecs.
//!
//! A payload is seen as one MSB-first bitstream that is cut into groups of
//! `depth` bits. Every carrier byte receives exactly one group in its low
//! bits. Decoding walks the carriers in the same order and glues the groups
//! back together.

use std::fmt;
use std::io::{Cursor, Read};

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::StegError;

/// Number of low order bits of each carrier byte that hold payload, `1..=8`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    pub const MIN: BitDepth = BitDepth(1);
    pub const MAX: BitDepth = BitDepth(8);

    pub fn new(depth: u8) -> Result<Self, StegError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&depth) {
            Ok(Self(depth))
        } else {
            Err(StegError::InvalidBitDepth(depth))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `(1 << depth) - 1`
    pub fn mask(self) -> u8 {
        ((1u16 << self.0) - 1) as u8
    }

    /// all depths in ascending order
    pub fn all() -> impl Iterator<Item = BitDepth> {
        (Self::MIN.0..=Self::MAX.0).map(BitDepth)
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = StegError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// zeroes the low `depth` bits, at depth 8 nothing of the byte survives
#[inline(always)]
pub fn mask_clear(byte: u8, depth: BitDepth) -> u8 {
    byte & !depth.mask()
}

/// keeps only the low `depth` bits
#[inline(always)]
pub fn mask_extract(byte: u8, depth: BitDepth) -> u8 {
    byte & depth.mask()
}

/// zero padded binary representation of the low `depth` bits of `value`
pub fn format_bits(value: u8, depth: BitDepth) -> String {
    format!(
        "{:0width$b}",
        mask_extract(value, depth),
        width = depth.get() as usize
    )
}

/// every byte as 8 binary digits, most significant bit first
pub fn to_bit_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:08b}")).collect()
}

/// head of a bitstream for trace output: up to 6 bytes as bits and the first
/// group at `depth`
fn describe_stream(bytes: &[u8], depth: BitDepth) -> String {
    let head = to_bit_string(&bytes[..bytes.len().min(6)]);
    match bytes.first() {
        Some(first) => format!(
            "{head}, first group {}",
            format_bits(first >> (8 - depth.get()), depth)
        ),
        None => "an empty stream".to_string(),
    }
}

/// Cuts a byte slice into `depth` wide bit groups, MSB first.
///
/// The final group is right padded with zero bits when the number of bits is
/// not a multiple of `depth`.
pub struct BitChunks<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    remaining_bits: u64,
    depth: BitDepth,
}

impl<'a> BitChunks<'a> {
    pub fn new(bytes: &'a [u8], depth: BitDepth) -> Self {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("hiding {}", describe_stream(bytes, depth));
        }
        Self {
            reader: BitReader::endian(Cursor::new(bytes), BigEndian),
            remaining_bits: bytes.len() as u64 * 8,
            depth,
        }
    }
}

impl Iterator for BitChunks<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining_bits == 0 {
            return None;
        }
        let depth = self.depth.get() as u32;
        let take = self.remaining_bits.min(depth as u64) as u32;
        let bits: u8 = self.reader.read(take).ok()?;
        self.remaining_bits -= take as u64;

        Some(bits << (depth - take))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let depth = self.depth.get() as u64;
        let len = self.remaining_bits.div_ceil(depth) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitChunks<'_> {}

/// Hides bit groups in the carriers, one group per carrier, until either side
/// runs dry. Returns the number of groups written.
pub fn embed<'c, C, B>(carriers: C, chunks: &mut B, depth: BitDepth) -> usize
where
    C: IntoIterator<Item = &'c mut u8>,
    B: Iterator<Item = u8>,
{
    let mut written = 0;
    for (carrier, bits) in carriers.into_iter().zip(chunks) {
        *carrier = mask_clear(*carrier, depth) | bits;
        written += 1;
    }

    written
}

/// Reassembles bytes out of the low bits of a stream of carrier bytes.
///
/// Reading ends when the carriers are exhausted, a trailing incomplete byte is
/// dropped.
pub struct LsbReader<I> {
    carriers: I,
    depth: BitDepth,
    acc: u16,
    acc_bits: u8,
}

impl<I> LsbReader<I>
where
    I: Iterator<Item = u8>,
{
    pub fn new(carriers: I, depth: BitDepth) -> Self {
        Self {
            carriers,
            depth,
            acc: 0,
            acc_bits: 0,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        while self.acc_bits < 8 {
            let carrier = self.carriers.next()?;
            self.acc = (self.acc << self.depth.get()) | mask_extract(carrier, self.depth) as u16;
            self.acc_bits += self.depth.get();
        }
        self.acc_bits -= 8;
        let byte = (self.acc >> self.acc_bits) as u8;
        self.acc &= (1u16 << self.acc_bits) - 1;

        Some(byte)
    }
}

impl<I> Read for LsbReader<I>
where
    I: Iterator<Item = u8>,
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut n = 0;
        for slot in buf.iter_mut() {
            match self.next_byte() {
                Some(b) => {
                    *slot = b;
                    n += 1;
                }
                None => break,
            }
        }

        Ok(n)
    }
}

/// Order in which the three color channels of a pixel are visited.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

impl ChannelOrder {
    #[inline(always)]
    fn arrange<T>(self, r: T, g: T, b: T) -> [T; 3] {
        match self {
            ChannelOrder::Rgb => [r, g, b],
            ChannelOrder::Bgr => [b, g, r],
        }
    }
}

/// mutable color channels of an interleaved pixel buffer, alpha (if any) is skipped
pub fn channels_mut(
    pixels: &mut [u8],
    stride: usize,
    order: ChannelOrder,
) -> impl Iterator<Item = &mut u8> {
    pixels
        .chunks_exact_mut(stride)
        .filter_map(move |px| match px {
            [r, g, b, ..] => Some(order.arrange(r, g, b)),
            _ => None,
        })
        .flatten()
}

/// readonly color channels of an interleaved pixel buffer, alpha (if any) is skipped
pub fn channels(pixels: &[u8], stride: usize, order: ChannelOrder) -> impl Iterator<Item = u8> + '_ {
    pixels
        .chunks_exact(stride)
        .filter_map(move |px| match px {
            [r, g, b, ..] => Some(order.arrange(*r, *g, *b)),
            _ => None,
        })
        .flatten()
}
