use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, trace};

use crate::media::VideoOptions;
use crate::media::video::FrameStore;
use crate::{Result, StegError};

/// Thin wrapper around the `ffmpeg` and `ffprobe` executables.
///
/// Every call passes its arguments as an array, no shell is involved.
pub struct Ffmpeg<'a> {
    ffmpeg: &'a Path,
    ffprobe: &'a Path,
}

/// Width, height and frame count of the first video stream
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub frames: u64,
}

impl<'a> Ffmpeg<'a> {
    pub fn new(opts: &'a VideoOptions) -> Self {
        Self {
            ffmpeg: &opts.ffmpeg,
            ffprobe: &opts.ffprobe,
        }
    }

    /// frame rate of the first video stream as `num/den`, as ffmpeg accepts it
    pub fn frame_rate(&self, src: &Path) -> Result<String> {
        let out = self.probe(
            Command::new(self.ffprobe)
                .args(["-v", "error", "-select_streams", "v:0"])
                .args(["-show_entries", "stream=r_frame_rate"])
                .args(["-of", "default=noprint_wrappers=1:nokey=1"])
                .arg(src),
        )?;

        parse_rate(&out)
            .ok_or_else(|| StegError::CorruptMedium(format!("no usable frame rate in {src:?}")))
    }

    pub fn has_audio(&self, src: &Path) -> Result<bool> {
        let out = self.probe(
            Command::new(self.ffprobe)
                .args(["-v", "error", "-select_streams", "a"])
                .args(["-show_entries", "stream=index"])
                .args(["-of", "csv=p=0"])
                .arg(src),
        )?;

        Ok(!out.trim().is_empty())
    }

    /// counts the packets of the first video stream, which does not need any decoding
    pub fn geometry(&self, src: &Path) -> Result<Geometry> {
        let out = self.probe(
            Command::new(self.ffprobe)
                .args(["-v", "error", "-select_streams", "v:0", "-count_packets"])
                .args(["-show_entries", "stream=width,height,nb_read_packets"])
                .args(["-of", "csv=p=0"])
                .arg(src),
        )?;

        parse_geometry(&out)
            .ok_or_else(|| StegError::CorruptMedium(format!("no video stream in {src:?}")))
    }

    /// writes every frame of the first video stream as 24 bit RGB PNG into `store`
    pub fn extract_frames(&self, src: &Path, store: &FrameStore) -> Result<()> {
        self.run(&mut self.extract_frames_command(src, &store.pattern()))?;

        if store.frames()?.is_empty() {
            return Err(StegError::external(self.ffmpeg, "no frames were extracted"));
        }

        Ok(())
    }

    /// encodes the frames in `store` losslessly as PNG video stream at `fps`
    pub fn assemble_video(&self, store: &FrameStore, fps: &str, target: &Path) -> Result<()> {
        self.run(
            Command::new(self.ffmpeg)
                .args(["-v", "error", "-nostdin", "-y", "-framerate", fps, "-i"])
                .arg(store.pattern())
                .args(["-c:v", "png"])
                .arg(target),
        )?;

        self.expect_output(target)
    }

    /// copies the first audio stream as is, `target` should be a Matroska file
    pub fn extract_audio(&self, src: &Path, target: &Path) -> Result<()> {
        self.run(&mut self.extract_audio_command(src, target))?;

        self.expect_output(target)
    }

    /// combines the video stream of `video` with the audio stream of `audio`, no re-encoding
    pub fn mux(&self, video: &Path, audio: &Path, target: &Path) -> Result<()> {
        self.run(
            Command::new(self.ffmpeg)
                .args(["-v", "error", "-nostdin", "-y", "-i"])
                .arg(video)
                .arg("-i")
                .arg(audio)
                .args(["-map", "0:v:0", "-map", "1:a:0", "-c", "copy"])
                .arg(target),
        )?;

        self.expect_output(target)
    }

    /// one PNG per decoded frame, no frame dropped or duplicated
    fn extract_frames_command(&self, src: &Path, pattern: &Path) -> Command {
        let mut cmd = Command::new(self.ffmpeg);
        cmd.args(["-v", "error", "-nostdin", "-y", "-i"])
            .arg(src)
            .args(["-map", "0:v:0", "-fps_mode", "passthrough", "-pix_fmt", "rgb24"])
            .arg(pattern);
        cmd
    }

    fn extract_audio_command(&self, src: &Path, target: &Path) -> Command {
        let mut cmd = Command::new(self.ffmpeg);
        cmd.args(["-v", "error", "-nostdin", "-y", "-i"])
            .arg(src)
            .args(["-map", "0:a:0", "-c:a", "copy"])
            .arg(target);
        cmd
    }

    fn expect_output(&self, path: &Path) -> Result<()> {
        if path.is_file() {
            Ok(())
        } else {
            Err(StegError::external(
                self.ffmpeg,
                format!("{path:?} was not created"),
            ))
        }
    }

    fn probe(&self, cmd: &mut Command) -> Result<String> {
        execute(self.ffprobe, cmd)
    }

    fn run(&self, cmd: &mut Command) -> Result<String> {
        execute(self.ffmpeg, cmd)
    }
}

fn execute(tool: &Path, cmd: &mut Command) -> Result<String> {
    debug!("running {cmd:?}");
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| StegError::external(tool, format!("could not be started: {e}")))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(StegError::external(
            tool,
            format!("{}: {}", output.status, stderr.trim()),
        ));
    }
    if !stderr.trim().is_empty() {
        trace!("{}", stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn parse_rate(out: &str) -> Option<String> {
    let rate = out.lines().next()?.trim();
    let (num, den) = rate.split_once('/').unwrap_or((rate, "1"));
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if num > 0.0 && den > 0.0 {
        Some(rate.to_string())
    } else {
        None
    }
}

fn parse_geometry(out: &str) -> Option<Geometry> {
    let mut fields = out.lines().next()?.trim().split(',');
    let width = fields.next()?.trim().parse().ok()?;
    let height = fields.next()?.trim().parse().ok()?;
    let frames = fields.next()?.trim().parse().ok()?;

    Some(Geometry {
        width,
        height,
        frames,
    })
}
