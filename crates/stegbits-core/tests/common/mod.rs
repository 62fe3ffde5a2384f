#![allow(dead_code)]

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageBuffer, Rgb, Rgba, RgbaImage};
use stegbits_core::BitDepth;

pub fn depth(d: u8) -> BitDepth {
    BitDepth::new(d).unwrap()
}

/// an RGB image with a bit of structure in every channel
pub fn rgb_cover(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    ImageBuffer::from_fn(w, h, |x, y| {
        Rgb([(x * 3 + y) as u8, (y * 5 + 7) as u8, (x ^ y) as u8])
    })
    .save(&path)
    .unwrap();
    path
}

pub fn rgba_cover(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    ImageBuffer::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 90, (x + y) as u8]))
        .save(&path)
        .unwrap();
    path
}

/// an animated GIF using a handful of colors per frame
pub fn gif_cover(dir: &Path, frames: usize, w: u32, h: u32) -> PathBuf {
    let path = dir.join("cover.gif");
    let colors = [[30, 60, 90, 255], [200, 180, 20, 255], [5, 250, 128, 255]];
    let frames = (0..frames).map(|n| {
        let img = RgbaImage::from_fn(w, h, |x, y| {
            Rgba(colors[(x as usize / 3 + y as usize / 5 + n) % colors.len()])
        });
        Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(80, 1))
    });

    let mut encoder = GifEncoder::new(std::fs::File::create(&path).unwrap());
    encoder.set_repeat(Repeat::Infinite).unwrap();
    encoder.encode_frames(frames).unwrap();
    path
}

pub fn wav_spec(channels: u16, bits: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate: 44_100,
        bits_per_sample: bits,
        sample_format: SampleFormat::Int,
    }
}

/// a sine wave as 8 or 16 bit integer samples
pub fn wav_cover(dir: &Path, spec: WavSpec, frames: usize) -> PathBuf {
    let path = dir.join("cover.wav");
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for i in 0..frames * spec.channels as usize {
        let s = (i as f32 * 0.05).sin();
        match spec.bits_per_sample {
            8 => writer.write_sample((s * i8::MAX as f32) as i8).unwrap(),
            16 => writer.write_sample((s * i16::MAX as f32) as i16).unwrap(),
            bits => panic!("no fixture for {bits} bit samples"),
        }
    }
    writer.finalize().unwrap();
    path
}
