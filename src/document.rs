use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::layer::RawLayer;

/// A decoded PSD: canvas size plus flattened, path-named layers.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Document {
    pub width: u32,
    pub height: u32,
    /// Channel count declared in the file header.
    pub channels: u16,
    /// Output layers, topmost first. Group markers are not included.
    pub layers: Vec<Layer>,
    /// Non-fatal problems encountered while decoding.
    pub warnings: Vec<Warning>,
}

impl Document {
    /// Find a layer by its full path.
    pub fn layer<S: AsRef<str>>(&self, path: &[S]) -> Option<&Layer> {
        self.layers.iter().find(|l| {
            l.path.len() == path.len() && l.path.iter().zip(path).all(|(a, b)| a == b.as_ref())
        })
    }
}

/// Layer bounding box in canvas coordinates. `bottom` and `right` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.right.abs_diff(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.abs_diff(self.top)
    }
}

/// Four-character blend mode key, e.g. `norm` or `mul `.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendMode(pub [u8; 4]);

impl BlendMode {
    pub const NORMAL: Self = Self(*b"norm");
    pub const PASS_THROUGH: Self = Self(*b"pass");
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            fmt::Write::write_char(f, char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlendMode({self})")
    }
}

/// One drawable layer, padded out to the full canvas.
///
/// Pixels are packed `u32` values: red in bits 0–7, green 8–15, blue 16–23,
/// alpha 24–31, so `to_le_bytes` yields RGBA order. Rows inside the layer's
/// bounding box are written starting from its bottom edge.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Layer {
    /// Enclosing group names, outermost first, then the layer's own name.
    pub path: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub bounds: Bounds,
    pub blend_mode: BlendMode,
    pub opacity: u8,
    /// Nonzero when the layer clips to the one below it.
    pub clipping: u8,
    pub hidden: bool,
    pixels: Vec<u32>,
}

impl Layer {
    pub(crate) fn from_raw(
        raw: &RawLayer,
        path: Vec<String>,
        width: u32,
        height: u32,
        pixels: Vec<u32>,
    ) -> Self {
        Self {
            path,
            width,
            height,
            bounds: raw.bounds,
            blend_mode: raw.blend_mode,
            opacity: raw.opacity,
            clipping: raw.clipping,
            hidden: raw.is_hidden(),
            pixels,
        }
    }

    /// The layer's own name (last path segment).
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("")
    }

    /// The path joined with `separator`, e.g. `"Folder/Layer 1"`.
    pub fn path_string(&self, separator: &str) -> String {
        self.path.join(separator)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Packed pixel at canvas coordinate `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(x as usize + y as usize * self.width as usize)
            .copied()
    }

    /// Pixels as interleaved RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }

    /// Pixels as typed RGBA values.
    #[cfg(feature = "rgb")]
    pub fn to_rgba_pixels(&self) -> Vec<rgb::RGBA8> {
        self.pixels
            .iter()
            .map(|p| {
                let [r, g, b, a] = p.to_le_bytes();
                rgb::RGBA8::new(r, g, b, a)
            })
            .collect()
    }

    /// Zero-copy 2D view of the packed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, u32> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Owned 2D buffer of typed RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.to_rgba_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// A recoverable decode problem. The affected data was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Warning {
    /// A channel other than red, green, blue or transparency (user or
    /// vector mask). `layer` is the index of the layer record in file order.
    UnsupportedChannelKind {
        layer: usize,
        channel: usize,
        kind: i16,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedChannelKind {
                layer,
                channel,
                kind,
            } => write!(
                f,
                "layer {layer} channel {channel}: unsupported channel kind {kind}, ignored"
            ),
        }
    }
}
