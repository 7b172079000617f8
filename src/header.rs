//! File header and the opaque sections that precede the layer data.

use crate::cursor::Cursor;
use crate::error::{PsdError, Unsupported};
use crate::info::ColorMode;

const SIGNATURE: [u8; 4] = *b"8BPS";
const VERSION: u16 = 1;
const SUPPORTED_DEPTH: u16 = 8;

/// Fixed 26-byte file header, as stored.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FileHeader {
    pub channels: u16,
    pub height: u32,
    pub width: u32,
    pub depth: u16,
    pub color_mode: ColorMode,
}

/// Read the fixed header. Signature and version are checked here; depth
/// and color mode are only read (see [`FileHeader::validate`]).
pub(crate) fn read_header(cursor: &mut Cursor<'_>) -> Result<FileHeader, PsdError> {
    let signature = cursor.read_array::<4>()?;
    if signature != SIGNATURE {
        return Err(Unsupported::Signature { found: signature }.into());
    }
    let version = cursor.read_u16()?;
    if version != VERSION {
        return Err(Unsupported::Version { found: version }.into());
    }
    cursor.skip(6)?; // reserved, zero

    let channels = cursor.read_u16()?;
    let height = cursor.read_u32()?;
    let width = cursor.read_u32()?;
    let depth = cursor.read_u16()?;
    let color_mode = ColorMode::from_u16(cursor.read_u16()?);

    Ok(FileHeader {
        channels,
        height,
        width,
        depth,
        color_mode,
    })
}

impl FileHeader {
    /// Reject anything but 8-bit RGB.
    pub(crate) fn validate(&self) -> Result<(), PsdError> {
        if self.depth != SUPPORTED_DEPTH {
            return Err(Unsupported::Depth { found: self.depth }.into());
        }
        if self.color_mode != ColorMode::Rgb {
            return Err(Unsupported::ColorMode {
                found: self.color_mode.to_u16(),
            }
            .into());
        }
        Ok(())
    }
}

/// Skip the color mode data and image resources sections.
pub(crate) fn skip_resource_sections(cursor: &mut Cursor<'_>) -> Result<(), PsdError> {
    let color_data = cursor.skip_block()?;
    let resources = cursor.skip_block()?;
    log::debug!("skipped {color_data} bytes of color mode data, {resources} bytes of image resources");
    Ok(())
}
