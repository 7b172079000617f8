//! Layer and mask information section: section header and layer records.

use alloc::string::String;
use alloc::vec::Vec;

use enough::Stop;

use super::{ChannelKind, RawChannel, RawLayer};
use crate::cursor::Cursor;
use crate::document::{BlendMode, Bounds};
use crate::error::{PsdError, Unsupported};
use crate::limits::Limits;

const BLEND_SIGNATURE: [u8; 4] = *b"8BIM";

/// Read the section header and every layer record, leaving the cursor at
/// the start of the channel image data.
pub(crate) fn read_layer_records(
    cursor: &mut Cursor<'_>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<RawLayer>, PsdError> {
    let section_len = cursor.read_u32()?;
    if section_len == 0 {
        // Flattened document: the merged image data follows directly.
        log::debug!("no layer and mask section");
        return Ok(Vec::new());
    }
    let section_end = cursor.position().saturating_add(section_len as usize);
    log::debug!("layer and mask section: {section_len} bytes, ends at offset {section_end}");

    let info_len = cursor.read_u32()?;
    if info_len == 0 {
        log::debug!("no layer info block");
        return Ok(Vec::new());
    }

    let stored_count = cursor.read_i16()?;
    // A negative count means the first alpha channel holds the merged
    // transparency; the merged image itself is never read.
    let count = stored_count.unsigned_abs();
    if let Some(limits) = limits {
        limits.check_layer_count(u32::from(count))?;
    }
    log::debug!(
        "{count} layer records (merged alpha: {})",
        stored_count < 0
    );

    let mut layers = Vec::with_capacity(usize::from(count));
    for index in 0..usize::from(count) {
        stop.check()?;
        layers.push(read_record(cursor, index)?);
    }
    Ok(layers)
}

fn read_record(cursor: &mut Cursor<'_>, index: usize) -> Result<RawLayer, PsdError> {
    let bounds = Bounds {
        top: cursor.read_i32()?,
        left: cursor.read_i32()?,
        bottom: cursor.read_i32()?,
        right: cursor.read_i32()?,
    };
    if bounds.bottom < bounds.top || bounds.right < bounds.left {
        return Err(PsdError::InvalidLayerBounds {
            layer: index,
            top: bounds.top,
            left: bounds.left,
            bottom: bounds.bottom,
            right: bounds.right,
        });
    }

    let channel_count = cursor.read_u16()?;
    let mut channels = Vec::with_capacity(usize::from(channel_count));
    for _ in 0..channel_count {
        let kind = ChannelKind::from_i16(cursor.read_i16()?);
        let length = cursor.read_u32()?;
        channels.push(RawChannel {
            kind,
            length,
            data: Vec::new(),
        });
    }

    let signature = cursor.read_array::<4>()?;
    if signature != BLEND_SIGNATURE {
        return Err(Unsupported::BlendSignature {
            layer: index,
            found: signature,
        }
        .into());
    }
    let blend_mode = BlendMode(cursor.read_array::<4>()?);
    let opacity = cursor.read_u8()?;
    let clipping = cursor.read_u8()?;
    let flags = cursor.read_u8()?;
    cursor.skip(1)?; // filler

    let extra_len = cursor.read_u32()?;
    let extra_end = cursor
        .position()
        .checked_add(extra_len as usize)
        .ok_or(PsdError::TruncatedInput {
            offset: cursor.position(),
            needed: extra_len as usize,
        })?;

    cursor.skip_block()?; // layer mask / adjustment layer data
    cursor.skip_block()?; // blending ranges
    let name = read_pascal_name(cursor)?;

    // Additional layer information ('luni', 'lsct', effects, ...) is not
    // interpreted.
    if cursor.position() > extra_end {
        return Err(PsdError::InvalidData(alloc::format!(
            "layer {index}: record overruns its extra data block by {} bytes",
            cursor.position() - extra_end
        )));
    }
    cursor.skip_to(extra_end)?;

    Ok(RawLayer {
        bounds,
        name,
        blend_mode,
        opacity,
        clipping,
        flags,
        channels,
    })
}

/// Length-prefixed name, padded so the field (prefix included) is a
/// multiple of 4 bytes. Bytes map one-to-one onto chars.
fn read_pascal_name(cursor: &mut Cursor<'_>) -> Result<String, PsdError> {
    let len = usize::from(cursor.read_u8()?);
    let name = cursor.take(len)?.iter().map(|&b| char::from(b)).collect();
    let field = 1 + len;
    cursor.skip(field.next_multiple_of(4) - field)?;
    Ok(name)
}
