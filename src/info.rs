use crate::cursor::Cursor;
use crate::error::PsdError;
use crate::header;

/// Document color mode, as declared in the file header.
///
/// Only [`ColorMode::Rgb`] decodes; the others are reported by
/// [`PsdInfo::from_bytes`] so callers can explain why a file was rejected.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Bitmap,
    Grayscale,
    Indexed,
    Rgb,
    Cmyk,
    Multichannel,
    Duotone,
    Lab,
    Other(u16),
}

impl ColorMode {
    pub(crate) fn from_u16(mode: u16) -> Self {
        match mode {
            0 => Self::Bitmap,
            1 => Self::Grayscale,
            2 => Self::Indexed,
            3 => Self::Rgb,
            4 => Self::Cmyk,
            7 => Self::Multichannel,
            8 => Self::Duotone,
            9 => Self::Lab,
            other => Self::Other(other),
        }
    }

    /// The header field value for this mode.
    pub fn to_u16(self) -> u16 {
        match self {
            Self::Bitmap => 0,
            Self::Grayscale => 1,
            Self::Indexed => 2,
            Self::Rgb => 3,
            Self::Cmyk => 4,
            Self::Multichannel => 7,
            Self::Duotone => 8,
            Self::Lab => 9,
            Self::Other(other) => other,
        }
    }
}

/// Header-level facts about a PSD, read without decoding any layers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct PsdInfo {
    pub width: u32,
    pub height: u32,
    /// Channel count declared in the header (merged image channels).
    pub channels: u16,
    /// Bits per channel.
    pub depth: u16,
    pub color_mode: ColorMode,
}

impl PsdInfo {
    /// Probe the header. Fails only on a bad signature, bad version, or
    /// truncation; depth and color mode are reported, not checked.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PsdError> {
        let mut cursor = Cursor::new(data);
        let h = header::read_header(&mut cursor)?;
        Ok(Self {
            width: h.width,
            height: h.height,
            channels: h.channels,
            depth: h.depth,
            color_mode: h.color_mode,
        })
    }

    /// Whether [`crate::decode`] accepts this depth and color mode.
    pub fn is_supported(&self) -> bool {
        self.depth == 8 && self.color_mode == ColorMode::Rgb
    }
}
