//! Merge a layer's decoded channels into a canvas-sized packed buffer.

use alloc::vec;
use alloc::vec::Vec;

use super::RawLayer;
use crate::document::Warning;

/// Composite `layer` (file index `index`) onto a zeroed `width` x `height`
/// canvas. Samples outside the canvas are dropped; mask channels are
/// skipped and reported in `warnings`.
pub(crate) fn composite(
    layer: &RawLayer,
    index: usize,
    width: usize,
    height: usize,
    warnings: &mut Vec<Warning>,
) -> Vec<u32> {
    let mut pixels = vec![0u32; width * height];
    let box_width = layer.bounds.width() as usize;
    if box_width == 0 {
        return pixels;
    }
    let left = i64::from(layer.bounds.left);
    let bottom = i64::from(layer.bounds.bottom);

    for (channel_index, channel) in layer.channels.iter().enumerate() {
        let Some(shift) = channel.kind.shift() else {
            let kind = channel.kind.to_i16();
            log::warn!(
                "layer {index} ({:?}) channel {channel_index}: unsupported channel kind {kind}, ignoring",
                layer.name
            );
            warnings.push(Warning::UnsupportedChannelKind {
                layer: index,
                channel: channel_index,
                kind,
            });
            continue;
        };

        // Rows are laid down from the bottom edge of the box upwards.
        for (row, samples) in channel.data.chunks(box_width).enumerate() {
            let y = bottom - 1 - row as i64;
            if y < 0 {
                break;
            }
            if y >= height as i64 {
                continue;
            }
            let line = &mut pixels[y as usize * width..(y as usize + 1) * width];
            for (col, &sample) in samples.iter().enumerate() {
                let x = left + col as i64;
                if x < 0 {
                    continue;
                }
                if x >= width as i64 {
                    break;
                }
                line[x as usize] |= u32::from(sample) << shift;
            }
        }
    }
    pixels
}
