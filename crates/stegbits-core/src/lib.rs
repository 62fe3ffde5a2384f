//! # Stegbits Core API
//!
//! Hides arbitrary bytes in the least significant bits of a carrier medium and
//! gets them back out again. Supported carriers are
//! - still images (PNG, BMP and, with a fidelity warning, JPEG)
//! - animated GIF images
//! - PCM WAV audio
//! - videos (MP4, AVI, MOV, MKV), with `ffmpeg` and `ffprobe` available
//!
//! The number of low bits used per carrier byte is the [`BitDepth`], `1..=8`.
//! Hiding and unveiling must use the same depth.
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust
//! use stegbits_core::BitDepth;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let cover = temp_dir.path().join("cover.png");
//! image::RgbImage::from_pixel(64, 64, image::Rgb([120, 80, 200]))
//!     .save(&cover)
//!     .expect("Failed to write cover image");
//!
//! let stego = stegbits_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_cover(&cover)
//!     .with_depth(BitDepth::new(2).unwrap())
//!     .into_output_folder(temp_dir.path())
//!     .execute()
//!     .expect("Failed to hide message in image");
//!
//! assert_eq!(stego, temp_dir.path().join("stego_image.png"));
//! ```
//!
//! ## Unveil the message again
//!
//! ```rust
//! # use stegbits_core::BitDepth;
//! # use tempfile::tempdir;
//! # let temp_dir = tempdir().unwrap();
//! # let cover = temp_dir.path().join("cover.png");
//! # image::RgbImage::from_pixel(64, 64, image::Rgb([1, 2, 3])).save(&cover).unwrap();
//! # let stego = stegbits_core::api::hide::prepare()
//! #     .with_message("Hello, World!")
//! #     .with_cover(&cover)
//! #     .with_depth(BitDepth::new(2).unwrap())
//! #     .into_output_folder(temp_dir.path())
//! #     .execute()
//! #     .unwrap();
//! let unveiled = stegbits_core::api::unveil::prepare()
//!     .from_secret_file(&stego)
//!     .with_depth(BitDepth::new(2).unwrap())
//!     .execute()
//!     .expect("Failed to unveil message from image");
//!
//! assert_eq!(unveiled.text(), "Hello, World!");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bits;
pub mod capacity;
pub mod commands;
pub mod error;
pub mod media;
pub mod payload;
pub mod result;

pub use crate::bits::BitDepth;
pub use crate::capacity::Capacity;
pub use crate::error::{ErrorKind, StegError};
pub use crate::media::{Codec, CodecOptions, LsbCodec, MediaKind, VideoOptions};
pub use crate::result::{OperationResult, Result};
