//! # zenpsd
//!
//! Layered Photoshop (PSD) decoder. Turns a PSD byte buffer into a canvas
//! size and a list of flattened, path-named layers, each padded to the full
//! canvas.
//!
//! ## Supported Input
//!
//! - 8 bits per channel, RGB color mode
//! - Raw and PackBits (RLE) channel compression
//! - Layer groups, reconstructed into `["Group", "Sub group", "Layer"]` paths
//! - Transparency channels; user and vector masks are skipped with a
//!   [`Warning`]
//!
//! ## Non-Goals
//!
//! - 16/32-bit documents, CMYK/Lab/grayscale/indexed color modes
//! - ZIP-compressed channels
//! - Blending, adjustment layers, layer effects, ICC profiles
//! - The merged composite image
//!
//! ## Usage
//!
//! ```no_run
//! use zenpsd::{PsdInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your PSD bytes
//!
//! // Probe without decoding
//! let info = PsdInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.color_mode);
//!
//! let doc = zenpsd::decode(data, Unstoppable)?;
//! for layer in &doc.layers {
//!     println!("{} ({} pixels)", layer.path_string("/"), layer.pixels().len());
//! }
//! for warning in &doc.warnings {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), zenpsd::PsdError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod cursor;
mod decode;
mod document;
mod error;
mod header;
mod info;
mod layer;
mod limits;

// Re-exports
pub use decode::DecodeRequest;
pub use document::{BlendMode, Bounds, Document, Layer, Warning};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{PsdError, Unsupported};
pub use info::{ColorMode, PsdInfo};
pub use limits::Limits;

/// Decode a PSD with no resource limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Document, PsdError> {
    DecodeRequest::new(data).decode(stop)
}
