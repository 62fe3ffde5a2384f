//! These tests need `ffmpeg` and `ffprobe` on the `PATH`, run them with
//! `cargo test -- --ignored`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use stegbits_core::api::{capacity, hide, unveil};
use stegbits_core::{CodecOptions, ErrorKind, VideoOptions};

mod common;
use common::*;

fn video_cover(dir: &Path, with_audio: bool) -> PathBuf {
    let path = dir.join("cover.mp4");
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-v", "error", "-y", "-f", "lavfi", "-i", "testsrc=size=64x48:rate=10"]);
    if with_audio {
        cmd.args(["-f", "lavfi", "-i", "sine=frequency=440:sample_rate=44100"]);
        cmd.args(["-c:a", "aac"]);
    }
    cmd.args(["-t", "1", "-c:v", "mpeg4", "-pix_fmt", "yuv420p"]).arg(&path);

    assert!(cmd.status().unwrap().success(), "ffmpeg could not create the cover");
    path
}

fn options_in(temp_root: &Path) -> CodecOptions {
    CodecOptions::default().with_video(VideoOptions::default().with_temp_root(temp_root))
}

#[test]
#[ignore]
fn video_should_round_trip() {
    let dir = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    let cover = video_cover(dir.path(), false);
    let opts = options_in(temp_root.path()).with_depth(depth(2));

    let stego = hide::prepare()
        .with_message("moving pictures")
        .with_cover(&cover)
        .with_options(opts.clone())
        .into_output_folder(dir.path())
        .execute()
        .unwrap();
    assert_eq!(stego, dir.path().join("cover_stego.mp4"));

    let unveiled = unveil::prepare()
        .from_secret_file(&stego)
        .with_options(opts)
        .execute()
        .unwrap();
    assert_eq!(unveiled.text(), "moving pictures");
    assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);
}

#[test]
#[ignore]
fn video_with_audio_should_keep_an_audio_track() {
    let dir = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    let cover = video_cover(dir.path(), true);
    let opts = options_in(temp_root.path());

    let stego = hide::prepare()
        .with_payload(vec![0u8, b'=', 0, 42])
        .with_cover(&cover)
        .with_options(opts.clone())
        .into_output_folder(dir.path())
        .execute()
        .unwrap();

    let probe = Command::new("ffprobe")
        .args(["-v", "error", "-select_streams", "a", "-show_entries", "stream=index"])
        .args(["-of", "csv=p=0"])
        .arg(&stego)
        .output()
        .unwrap();
    assert!(!String::from_utf8_lossy(&probe.stdout).trim().is_empty());

    let unveiled = unveil::prepare()
        .from_secret_file(&stego)
        .with_options(opts)
        .execute()
        .unwrap();
    assert_eq!(unveiled.payload, [0u8, b'=', 0, 42]);
    assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);
}

#[test]
#[ignore]
fn video_capacity_should_count_all_frames() {
    let dir = TempDir::new().unwrap();
    let cover = video_cover(dir.path(), false);

    let capacity = capacity::of(&cover, &CodecOptions::default()).unwrap();
    // 10 frames of 64x48 pixels, 3 channels at depth 1
    assert_eq!(capacity.total_bits(), 10 * 64 * 48 * 3);
}

#[test]
#[ignore]
fn oversized_payload_should_fail_and_clean_up() {
    let dir = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let cover = video_cover(dir.path(), false);

    let err = hide::prepare()
        .with_payload(vec![1u8; 100_000])
        .with_cover(&cover)
        .with_options(options_in(temp_root.path()))
        .into_output_folder(out_dir.path())
        .execute()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);
    assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_ffmpeg_should_fail_and_clean_up() {
    let dir = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    let cover = dir.path().join("cover.mkv");
    fs::write(&cover, b"no video at all").unwrap();
    let opts = CodecOptions::default().with_video(
        VideoOptions::default()
            .with_ffmpeg(dir.path().join("ffmpeg-missing"))
            .with_ffprobe(dir.path().join("ffprobe-missing"))
            .with_temp_root(temp_root.path()),
    );

    let err = hide::prepare()
        .with_message("x")
        .with_cover(&cover)
        .with_options(opts.clone())
        .into_output_folder(dir.path())
        .execute()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExternalTool);

    let err = unveil::prepare()
        .from_secret_file(&cover)
        .with_options(opts)
        .execute()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExternalTool);

    assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);
    assert!(!dir.path().join("cover_stego.mp4").exists());
}
