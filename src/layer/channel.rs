//! Channel image data: raw and PackBits-compressed planes.

use alloc::vec::Vec;

use enough::Stop;

use super::RawLayer;
use crate::cursor::Cursor;
use crate::error::{PsdError, Unsupported};
use crate::limits::Limits;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
enum Compression {
    Raw,
    PackBits,
}

impl Compression {
    fn from_u16(method: u16) -> Option<Self> {
        match method {
            0 => Some(Self::Raw),
            1 => Some(Self::PackBits),
            // 2 and 3 are ZIP without/with prediction.
            _ => None,
        }
    }
}

/// Decode the channel image data of every layer, in record order.
pub(crate) fn read_channel_data(
    cursor: &mut Cursor<'_>,
    layers: &mut [RawLayer],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<(), PsdError> {
    for (index, layer) in layers.iter_mut().enumerate() {
        let area = layer.area()?;
        let (_, rows) = layer.dimensions();
        if let Some(limits) = limits {
            limits.check_memory(area)?;
        }
        // Per-row byte counts preceding PackBits data; the decode loop
        // doesn't need them.
        let row_table = rows.checked_mul(2).ok_or(PsdError::DimensionsTooLarge {
            width: layer.bounds.width(),
            height: layer.bounds.height(),
        })?;

        for (channel_index, channel) in layer.channels.iter_mut().enumerate() {
            stop.check()?;
            let start = cursor.position();
            let method = cursor.read_u16()?;
            channel.data = match Compression::from_u16(method) {
                Some(Compression::Raw) => cursor.take(area)?.to_vec(),
                Some(Compression::PackBits) => {
                    cursor.skip(row_table)?;
                    unpack_bits(cursor, area, stop)?
                }
                None => {
                    return Err(Unsupported::Compression {
                        layer: index,
                        channel: channel_index,
                        method,
                    }
                    .into());
                }
            };

            // Trailing encoded bytes past the decoded area belong to this
            // channel, not the next one.
            let recorded_end = start.saturating_add(channel.length as usize);
            if recorded_end > cursor.position() {
                log::debug!(
                    "layer {index} channel {channel_index}: skipping {} trailing bytes",
                    recorded_end - cursor.position()
                );
                cursor.skip_to(recorded_end)?;
            }
        }
    }
    Ok(())
}

/// Decode PackBits runs until exactly `area` bytes are produced.
///
/// A run that crosses `area` contributes only the bytes still missing;
/// anything encoded after that point is never read.
pub(crate) fn unpack_bits(
    cursor: &mut Cursor<'_>,
    area: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PsdError> {
    // Each two-byte repeat packet expands to at most 128 bytes.
    let mut out = Vec::with_capacity(area.min(cursor.remaining().saturating_mul(64)));
    let mut packets = 0u32;

    while out.len() < area {
        packets = packets.wrapping_add(1);
        if packets % 1024 == 0 {
            stop.check()?;
        }

        let missing = area - out.len();
        let control = cursor.read_u8()?;
        match control {
            0x00..=0x7f => {
                let run = cursor.take(usize::from(control) + 1)?;
                out.extend_from_slice(&run[..run.len().min(missing)]);
            }
            // No-op packet.
            0x80 => {}
            0x81..=0xff => {
                let count = 257 - usize::from(control);
                let value = cursor.read_u8()?;
                out.resize(out.len() + count.min(missing), value);
            }
        }
    }
    Ok(out)
}
