use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::{BitDepth, Codec, CodecOptions, LsbCodec, Result, StegError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Debug)]
enum PayloadSource {
    Bytes(Vec<u8>),
    File(PathBuf),
}

#[derive(Default, Debug)]
pub struct HideApi {
    cover: Option<PathBuf>,
    payload: Option<PayloadSource>,
    output_folder: Option<PathBuf>,
    options: CodecOptions,
}

impl HideApi {
    /// Use the given codec options, this replaces a depth set before
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_depth(mut self, depth: BitDepth) -> Self {
        self.options.depth = depth;
        self
    }

    /// The medium that will carry the payload, its kind follows the file extension
    pub fn with_cover<A: AsRef<Path>>(mut self, cover: A) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    /// Hide these bytes. Any earlier payload is replaced.
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(PayloadSource::Bytes(payload.into()));
        self
    }

    pub fn with_message(self, message: &str) -> Self {
        self.with_payload(message.as_bytes())
    }

    /// Hide the content of this file. Any earlier payload is replaced.
    pub fn with_payload_file<A: AsRef<Path>>(mut self, file: A) -> Self {
        self.payload = Some(PayloadSource::File(file.as_ref().to_path_buf()));
        self
    }

    /// The stego file is written into this folder, it has to exist
    pub fn into_output_folder<A: AsRef<Path>>(mut self, output_folder: A) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Hides the payload and returns the path of the written stego file
    pub fn execute(self) -> Result<PathBuf> {
        let Some(cover) = self.cover else {
            return Err(StegError::CarrierNotSet);
        };
        let Some(output_folder) = self.output_folder else {
            return Err(StegError::TargetNotSet);
        };
        let payload = match self.payload {
            Some(PayloadSource::Bytes(bytes)) => bytes,
            Some(PayloadSource::File(file)) => {
                fs::read(&file).map_err(|source| StegError::ReadError { path: file, source })?
            }
            None => return Err(StegError::MissingPayload),
        };

        let codec = Codec::for_path(&cover)?;
        info!(
            "hiding {} bytes in {cover:?} at depth {}",
            payload.len(),
            self.options.depth
        );
        let stego = codec.hide(&cover, &payload, &output_folder, &self.options)?;
        info!("stego file written to {stego:?}");

        Ok(stego)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cover_in(dir: &Path) -> PathBuf {
        let cover = dir.join("cover.png");
        image::RgbImage::from_pixel(32, 32, image::Rgb([10, 20, 30]))
            .save(&cover)
            .unwrap();
        cover
    }

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let cover = cover_in(temp_dir.path());

        let stego = prepare()
            .with_message("Hello World")
            .with_cover(&cover)
            .with_depth(BitDepth::new(3).unwrap())
            .into_output_folder(temp_dir.path())
            .execute()
            .expect("Failed to hide message in image");

        assert_eq!(stego, temp_dir.path().join("stego_image.png"));
    }

    #[test]
    fn should_hide_a_payload_file() {
        let temp_dir = tempdir().unwrap();
        let cover = cover_in(temp_dir.path());
        let secret = temp_dir.path().join("secret.bin");
        fs::write(&secret, [0u8, 255, 61, 0]).unwrap();

        let stego = prepare()
            .with_payload_file(&secret)
            .with_cover(&cover)
            .into_output_folder(temp_dir.path())
            .execute()
            .unwrap();

        let unveiled = crate::api::unveil::prepare()
            .from_secret_file(stego)
            .execute()
            .unwrap();
        assert_eq!(unveiled.payload, [0u8, 255, 61, 0]);
    }

    #[test]
    fn should_complain_about_missing_parts() {
        let temp_dir = tempdir().unwrap();
        let cover = cover_in(temp_dir.path());

        assert!(matches!(
            prepare().with_message("x").into_output_folder(temp_dir.path()).execute(),
            Err(StegError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().with_message("x").with_cover(&cover).execute(),
            Err(StegError::TargetNotSet)
        ));
        assert!(matches!(
            prepare().with_cover(&cover).into_output_folder(temp_dir.path()).execute(),
            Err(StegError::MissingPayload)
        ));
        assert!(matches!(
            prepare()
                .with_payload_file(temp_dir.path().join("missing.bin"))
                .with_cover(&cover)
                .into_output_folder(temp_dir.path())
                .execute(),
            Err(StegError::ReadError { .. })
        ));
    }
}
