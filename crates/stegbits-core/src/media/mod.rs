pub mod animation;
pub mod audio;
pub mod codec_options;
pub mod image;
pub mod video;

use std::path::{Path, PathBuf};

use enum_dispatch::enum_dispatch;

pub use animation::{AnimatedImageCodec, Animation};
pub use audio::{AudioCodec, PcmAudio};
pub use codec_options::{CodecOptions, VideoOptions};
pub use self::image::{ImageCodec, Raster};
pub use video::{FrameStore, VideoCodec};

use crate::{Capacity, Result, StegError};

pub trait Persist {
    fn save_as(&mut self, _: &Path) -> Result<()>;
}

/// What every carrier codec is able to do
#[enum_dispatch]
pub trait LsbCodec {
    /// how much payload `media` takes at `opts.depth`
    fn capacity(&self, media: &Path, opts: &CodecOptions) -> Result<Capacity>;

    /// hides `payload` in `cover` and writes the stego file into `output_dir`
    fn hide(
        &self,
        cover: &Path,
        payload: &[u8],
        output_dir: &Path,
        opts: &CodecOptions,
    ) -> Result<PathBuf>;

    /// recovers the payload hidden in `secret`
    fn unveil(&self, secret: &Path, opts: &CodecOptions) -> Result<Vec<u8>>;
}

#[enum_dispatch(LsbCodec)]
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    ImageCodec,
    AnimatedImageCodec,
    AudioCodec,
    VideoCodec,
}

/// the kinds of carrier media, detected by file extension
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MediaKind {
    Image,
    AnimatedImage,
    Audio,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| StegError::UnsupportedMedia(format!("{} has no extension", path.display())))?;

        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" => Ok(Self::Image),
            "gif" => Ok(Self::AnimatedImage),
            "wav" | "wave" => Ok(Self::Audio),
            "mp4" | "avi" | "mov" | "mkv" => Ok(Self::Video),
            _ => Err(StegError::UnsupportedMedia(format!(".{ext} files"))),
        }
    }

    pub fn codec(self) -> Codec {
        match self {
            MediaKind::Image => ImageCodec.into(),
            MediaKind::AnimatedImage => AnimatedImageCodec.into(),
            MediaKind::Audio => AudioCodec.into(),
            MediaKind::Video => VideoCodec.into(),
        }
    }
}

impl Codec {
    pub fn for_path(path: &Path) -> Result<Self> {
        MediaKind::from_path(path).map(MediaKind::codec)
    }
}

/// joins `file_name` to `output_dir`, which has to be an existing directory
pub(crate) fn output_file(output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    if !output_dir.is_dir() {
        return Err(StegError::WriteError {
            path: output_dir.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "output folder does not exist",
            ),
        });
    }

    Ok(output_dir.join(file_name))
}

/// original extension of `path` as written, `fallback` if there is none
pub(crate) fn extension_or(path: &Path, fallback: &str) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_detect_media_kind_by_extension() {
        for (file, kind) in [
            ("a.png", MediaKind::Image),
            ("a.JPG", MediaKind::Image),
            ("a.jpeg", MediaKind::Image),
            ("a.bmp", MediaKind::Image),
            ("a.gif", MediaKind::AnimatedImage),
            ("a.wav", MediaKind::Audio),
            ("a.mp4", MediaKind::Video),
            ("a.MKV", MediaKind::Video),
            ("dir.with.dots/a.avi", MediaKind::Video),
            ("a.mov", MediaKind::Video),
        ] {
            assert_eq!(MediaKind::from_path(Path::new(file)).unwrap(), kind, "{file}");
        }
    }

    #[test]
    fn should_refuse_unknown_extensions() {
        for file in ["Cargo.toml", "a.mp3", "noext", "a.tiff"] {
            match MediaKind::from_path(Path::new(file)) {
                Err(StegError::UnsupportedMedia(_)) => (),
                other => panic!("{file}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn should_pick_the_matching_codec() {
        assert!(matches!(
            Codec::for_path(Path::new("x.gif")).unwrap(),
            Codec::AnimatedImageCodec(_)
        ));
        assert!(matches!(
            Codec::for_path(Path::new("x.wav")).unwrap(),
            Codec::AudioCodec(_)
        ));
    }

    #[test]
    fn output_file_should_require_an_existing_folder() {
        let result = output_file(Path::new("/this/folder/does/not/exist"), "stego_image.png");
        assert!(matches!(result, Err(StegError::WriteError { .. })));
    }
}
