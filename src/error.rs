use alloc::string::String;
use enough::StopReason;

/// Errors from PSD decoding.
///
/// Every variant is fatal: a decode that returns one of these produces no
/// document. Recoverable problems are reported as [`crate::Warning`]s instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PsdError {
    #[error("unexpected end of input: needed {needed} bytes at offset {offset}")]
    TruncatedInput { offset: usize, needed: usize },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(Unsupported),

    #[error("group close marker without an open group (layer {layer})")]
    InvalidGroupStructure { layer: usize },

    #[error("layer {layer} has inverted bounds: top {top}, left {left}, bottom {bottom}, right {right}")]
    InvalidLayerBounds {
        layer: usize,
        top: i32,
        left: i32,
        bottom: i32,
        right: i32,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// The header or layer field that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Unsupported {
    #[error("signature {found:02x?} is not 8BPS")]
    Signature { found: [u8; 4] },

    #[error("version {found} (only version 1 is supported)")]
    Version { found: u16 },

    #[error("bit depth {found} (only 8 bits per channel is supported)")]
    Depth { found: u16 },

    #[error("color mode {found} (only RGB, mode 3, is supported)")]
    ColorMode { found: u16 },

    #[error("layer {layer} blend signature {found:02x?} is not 8BIM")]
    BlendSignature { layer: usize, found: [u8; 4] },

    #[error("layer {layer} channel {channel} uses compression method {method}")]
    Compression {
        layer: usize,
        channel: usize,
        method: u16,
    },
}

impl From<Unsupported> for PsdError {
    fn from(u: Unsupported) -> Self {
        PsdError::UnsupportedFormat(u)
    }
}

impl From<StopReason> for PsdError {
    fn from(r: StopReason) -> Self {
        PsdError::Cancelled(r)
    }
}
