use alloc::vec::Vec;

use enough::Stop;

use crate::cursor::Cursor;
use crate::document::{Document, Layer};
use crate::error::PsdError;
use crate::header;
use crate::layer::{channel, composite, record, tree};
use crate::limits::Limits;

/// Builder for a PSD decode.
///
/// ```no_run
/// use zenpsd::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your PSD bytes
/// let limits = Limits {
///     max_pixels: Some(64 * 1024 * 1024),
///     ..Default::default()
/// };
/// let doc = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenpsd::PsdError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the whole document. Any fatal problem aborts with no partial
    /// result; skipped channels are listed in [`Document::warnings`].
    pub fn decode(self, stop: impl Stop) -> Result<Document, PsdError> {
        decode_document(self.data, self.limits, &stop)
    }
}

fn decode_document(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Document, PsdError> {
    let mut cursor = Cursor::new(data);

    let file_header = header::read_header(&mut cursor)?;
    file_header.validate()?;
    let (width, height) = (file_header.width, file_header.height);
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }
    let canvas = (width as usize)
        .checked_mul(height as usize)
        .ok_or(PsdError::DimensionsTooLarge { width, height })?;
    stop.check()?;

    header::skip_resource_sections(&mut cursor)?;

    let mut raw_layers = record::read_layer_records(&mut cursor, limits, stop)?;
    stop.check()?;
    channel::read_channel_data(&mut cursor, &mut raw_layers, limits, stop)?;

    let placements = tree::resolve_paths(&raw_layers)?;
    let layer_bytes = canvas
        .checked_mul(4)
        .and_then(|b| b.checked_mul(placements.len()))
        .ok_or(PsdError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_memory(layer_bytes)?;
    }

    let mut warnings = Vec::new();
    let mut layers = Vec::with_capacity(placements.len());
    for placement in placements {
        stop.check()?;
        let raw = &raw_layers[placement.index];
        let pixels = composite::composite(
            raw,
            placement.index,
            width as usize,
            height as usize,
            &mut warnings,
        );
        layers.push(Layer::from_raw(raw, placement.path, width, height, pixels));
    }

    log::debug!(
        "decoded {}x{} document: {} layers from {} records, {} warnings",
        width,
        height,
        layers.len(),
        raw_layers.len(),
        warnings.len()
    );

    Ok(Document {
        width,
        height,
        channels: file_header.channels,
        layers,
        warnings,
    })
}
