use tempfile::TempDir;

use stegbits_core::api::{capacity, hide, unveil};
use stegbits_core::{CodecOptions, StegError};

mod common;
use common::*;

#[test]
fn hello_world_in_a_256_square_png_at_depth_2() {
    let dir = TempDir::new().unwrap();
    let cover = image::RgbImage::from_pixel(256, 256, image::Rgb([128, 64, 32]));
    let cover_path = dir.path().join("cover.png");
    cover.save(&cover_path).unwrap();
    let out_dir = TempDir::new().unwrap();

    let opts = CodecOptions::default().with_depth(depth(2));
    assert!(capacity::of(&cover_path, &opts).unwrap().max_payload_bytes() >= 11 + 1);

    let stego = hide::prepare()
        .with_message("Hello World")
        .with_cover(&cover_path)
        .with_depth(depth(2))
        .into_output_folder(out_dir.path())
        .execute()
        .unwrap();

    let unveiled = unveil::prepare()
        .from_secret_file(stego)
        .with_depth(depth(2))
        .execute()
        .unwrap();
    assert_eq!(unveiled.text(), "Hello World");
}

#[test]
fn hundred_bytes_do_not_fit_into_a_4x4_png_at_depth_8() {
    let dir = TempDir::new().unwrap();
    let cover = rgb_cover(dir.path(), "tiny.png", 4, 4);
    let out_dir = TempDir::new().unwrap();

    let result = hide::prepare()
        .with_payload(vec![0xAB; 100])
        .with_cover(&cover)
        .with_depth(depth(8))
        .into_output_folder(out_dir.path())
        .execute();

    assert!(matches!(
        result,
        Err(StegError::CapacityExceeded { needed: 100, .. })
    ));
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_in_a_mono_8_bit_wav_of_10000_frames_at_depth_1() {
    let dir = TempDir::new().unwrap();
    let cover = wav_cover(dir.path(), wav_spec(1, 8), 10_000);
    let out_dir = TempDir::new().unwrap();

    let stego = hide::prepare()
        .with_message("test")
        .with_cover(&cover)
        .with_depth(depth(1))
        .into_output_folder(out_dir.path())
        .execute()
        .unwrap();

    let unveiled = unveil::prepare()
        .from_secret_file(stego)
        .with_depth(depth(1))
        .into_output_folder(out_dir.path())
        .execute()
        .unwrap();
    assert_eq!(unveiled.payload, b"test");
    assert_eq!(
        std::fs::read(out_dir.path().join("decoded_message.txt")).unwrap(),
        b"test"
    );
}
