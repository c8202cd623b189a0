//! # ezbmp
//!
//! BMP decoder that writes top-down, 4-bytes-per-pixel images into a buffer
//! the caller provides. The library never allocates and never touches the
//! filesystem: both the encoded input and the decoded output are borrowed.
//!
//! ## Supported Formats
//!
//! - 4-bit and 8-bit palette images (uncompressed)
//! - 24-bit BGR (uncompressed)
//! - 32-bit BGRA (uncompressed)
//! - 32-bit bitfields with per-channel masks from an extended DIB header
//!
//! Bottom-up (positive height) and top-down (negative height) row order are
//! both normalized to top-down; negative widths are mirrored back to
//! left-to-right.
//!
//! ## Non-Goals
//!
//! - RLE4/RLE8 compression (reported as [`BmpError::NotSupported`])
//! - 1, 2 and 16-bit depths, embedded JPEG/PNG
//! - Encoding, color management
//!
//! ## Usage
//!
//! ```no_run
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! let size = ezbmp::required_output_size(data);
//! if size == 0 {
//!     return Ok(()); // not a BMP
//! }
//! let mut pixels = vec![0u8; size];
//! let decoded = ezbmp::decode(data, &mut pixels)?;
//! println!("{}x{} {:?}", decoded.width, decoded.height, decoded.layout);
//! # Ok::<(), ezbmp::BmpError>(())
//! ```
//!
//! [`DecodeRequest`] adds limits, alternative byte orders, 32-bit alpha
//! handling, permissive decoding of truncated files, and cancellation
//! through [`Stop`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

mod error;
mod info;
mod limits;
mod pixel;

mod bmp;
mod decode;

// Re-exports
pub use bmp::{Compression, Permissiveness, required_output_size};
pub use decode::{DecodeOutput, DecodeRequest, decode};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{AlphaHandling, PixelLayout};
