use crate::bits::BitDepth;
use crate::error::StegError;
use crate::payload::HEADER_LEN;

/// `floor(units * channels * depth / 8) - terminator_len`, never below zero
pub fn max_payload_bytes(
    unit_count: u64,
    channels_per_unit: u8,
    depth: BitDepth,
    terminator_len: usize,
) -> usize {
    let raw = unit_count * channels_per_unit as u64 * depth.get() as u64 / 8;
    (raw as usize).saturating_sub(terminator_len)
}

/// share of all carrier bits that get replaced, in percent
pub fn distortion_estimate(payload_bits: u64, total_available_bits: u64) -> f64 {
    if total_available_bits == 0 {
        return 0.0;
    }
    payload_bits as f64 / total_available_bits as f64 * 100.0
}

/// How much a carrier can take at a given bit depth.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Capacity {
    /// pixels for images and frames, bytes for audio
    pub carrier_units: u64,
    pub channels_per_unit: u8,
    pub depth: BitDepth,
}

impl Capacity {
    pub fn new(carrier_units: u64, channels_per_unit: u8, depth: BitDepth) -> Self {
        Self {
            carrier_units,
            channels_per_unit,
            depth,
        }
    }

    /// number of bits that could hold payload
    pub fn total_bits(&self) -> u64 {
        self.carrier_units * self.channels_per_unit as u64 * self.depth.get() as u64
    }

    /// payload bytes that fit, framing already deducted
    pub fn max_payload_bytes(&self) -> usize {
        max_payload_bytes(
            self.carrier_units,
            self.channels_per_unit,
            self.depth,
            HEADER_LEN,
        )
    }

    /// percentage of all carrier bits that a payload of `payload_len` bytes replaces
    pub fn distortion(&self, payload_len: usize) -> f64 {
        let payload_bits = (payload_len + HEADER_LEN) as u64 * 8;
        let all_bits = self.carrier_units * self.channels_per_unit as u64 * 8;
        distortion_estimate(payload_bits, all_bits)
    }

    /// fails with `CapacityExceeded` when `payload_len` bytes do not fit
    pub fn ensure_fits(&self, payload_len: usize) -> Result<(), StegError> {
        let available = self.max_payload_bytes();
        if payload_len > available {
            return Err(StegError::CapacityExceeded {
                needed: payload_len,
                available,
            });
        }
        log::info!(
            "payload uses {payload_len}/{available} bytes at depth {}, estimated distortion {:.4}%",
            self.depth,
            self.distortion(payload_len)
        );

        Ok(())
    }
}
