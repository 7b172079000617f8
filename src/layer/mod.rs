//! Layer records, channel image data, group reconstruction and compositing.
//!
//! Layers are stored bottom-most first. Records for every layer come first,
//! followed by the channel image data for each layer in the same order.

pub(crate) mod channel;
pub(crate) mod composite;
pub(crate) mod record;
pub(crate) mod tree;

use alloc::string::String;
use alloc::vec::Vec;

use crate::document::{BlendMode, Bounds};
use crate::error::PsdError;

/// Flag bits that together mark a group open/close pseudo-layer
/// ("bit 4 is useful" and "pixel data irrelevant to appearance").
pub(crate) const GROUP_FLAGS: u8 = 0x18;
pub(crate) const HIDDEN_FLAG: u8 = 0x02;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChannelKind {
    Red,
    Green,
    Blue,
    Transparency,
    UserMask,
    VectorMask,
    Other(i16),
}

impl ChannelKind {
    pub(crate) fn from_i16(kind: i16) -> Self {
        match kind {
            0 => Self::Red,
            1 => Self::Green,
            2 => Self::Blue,
            -1 => Self::Transparency,
            -2 => Self::UserMask,
            -3 => Self::VectorMask,
            other => Self::Other(other),
        }
    }

    pub(crate) fn to_i16(self) -> i16 {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Transparency => -1,
            Self::UserMask => -2,
            Self::VectorMask => -3,
            Self::Other(other) => other,
        }
    }

    /// Bit position inside a packed pixel, or `None` for masks.
    pub(crate) fn shift(self) -> Option<u32> {
        match self {
            Self::Red => Some(0),
            Self::Green => Some(8),
            Self::Blue => Some(16),
            Self::Transparency => Some(24),
            Self::UserMask | Self::VectorMask | Self::Other(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RawChannel {
    pub kind: ChannelKind,
    /// Encoded length from the layer record, compression tag included.
    pub length: u32,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub(crate) struct RawLayer {
    pub bounds: Bounds,
    pub name: String,
    pub blend_mode: BlendMode,
    pub opacity: u8,
    pub clipping: u8,
    pub flags: u8,
    pub channels: Vec<RawChannel>,
}

impl RawLayer {
    pub(crate) fn is_group(&self) -> bool {
        self.flags & GROUP_FLAGS == GROUP_FLAGS
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.flags & HIDDEN_FLAG != 0
    }

    /// Bounding box width and height. Bounds are validated when the record
    /// is read, so neither side is negative here.
    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (
            self.bounds.width() as usize,
            self.bounds.height() as usize,
        )
    }

    /// Bytes in one fully decoded channel of this layer.
    pub(crate) fn area(&self) -> Result<usize, PsdError> {
        let (w, h) = self.dimensions();
        w.checked_mul(h).ok_or(PsdError::DimensionsTooLarge {
            width: w as u32,
            height: h as u32,
        })
    }
}
