//! Synthetic PSD writer for tests.

#![allow(dead_code)]

pub const GROUP_FLAGS: u8 = 0x18;
pub const GROUP_END: &str = "</Layer group>";

pub struct TestChannel {
    pub kind: i16,
    /// Compression tag followed by the encoded bytes.
    pub encoded: Vec<u8>,
    /// Length written into the layer record; defaults to `encoded.len()`.
    pub recorded_len: Option<u32>,
}

/// Uncompressed channel.
pub fn raw(kind: i16, bytes: &[u8]) -> TestChannel {
    let mut encoded = vec![0, 0];
    encoded.extend_from_slice(bytes);
    TestChannel {
        kind,
        encoded,
        recorded_len: None,
    }
}

/// PackBits channel with a zeroed scanline table for `rows` rows.
pub fn rle(kind: i16, rows: usize, packets: &[u8]) -> TestChannel {
    let mut encoded = vec![0, 1];
    encoded.resize(2 + rows * 2, 0);
    encoded.extend_from_slice(packets);
    TestChannel {
        kind,
        encoded,
        recorded_len: None,
    }
}

/// Channel with an arbitrary compression tag.
pub fn compressed(kind: i16, method: u16, body: &[u8]) -> TestChannel {
    let mut encoded = method.to_be_bytes().to_vec();
    encoded.extend_from_slice(body);
    TestChannel {
        kind,
        encoded,
        recorded_len: None,
    }
}

/// Encode `bytes` as PackBits using literal and repeat runs.
pub fn pack_bits(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let mut run = 1;
        while i + run < bytes.len() && bytes[i + run] == bytes[i] && run < 128 {
            run += 1;
        }
        if run >= 2 {
            out.push((257 - run) as u8);
            out.push(bytes[i]);
            i += run;
            continue;
        }
        let start = i;
        while i < bytes.len()
            && i - start < 128
            && !(i + 1 < bytes.len() && bytes[i + 1] == bytes[i])
        {
            i += 1;
        }
        if i == start {
            i += 1;
        }
        out.push((i - start - 1) as u8);
        out.extend_from_slice(&bytes[start..i]);
    }
    out
}

pub struct TestLayer {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
    pub name: String,
    pub flags: u8,
    pub opacity: u8,
    pub clipping: u8,
    pub blend: [u8; 4],
    pub signature: [u8; 4],
    pub channels: Vec<TestChannel>,
    /// Additional layer information appended after the name.
    pub extra: Vec<u8>,
}

impl TestLayer {
    pub fn new(name: &str, bounds: (i32, i32, i32, i32), channels: Vec<TestChannel>) -> Self {
        let (top, left, bottom, right) = bounds;
        Self {
            top,
            left,
            bottom,
            right,
            name: name.into(),
            flags: 0,
            opacity: 255,
            clipping: 0,
            blend: *b"norm",
            signature: *b"8BIM",
            channels,
            extra: Vec::new(),
        }
    }

    pub fn group(name: &str) -> Self {
        // Photoshop gives group records empty color and alpha channels.
        let empty = [-1, 0, 1, 2].map(|kind| raw(kind, &[]));
        let mut layer = Self::new(name, (0, 0, 0, 0), empty.into());
        layer.flags = GROUP_FLAGS;
        layer.blend = *b"pass";
        layer
    }

    pub fn group_end() -> Self {
        Self::group(GROUP_END)
    }
}

pub struct TestPsd {
    pub width: u32,
    pub height: u32,
    pub channels: u16,
    pub version: u16,
    pub depth: u16,
    pub color_mode: u16,
    pub color_data: Vec<u8>,
    pub resources: Vec<u8>,
    pub merged_alpha: bool,
    /// Layers in file order, bottom-most first.
    pub layers: Vec<TestLayer>,
}

impl TestPsd {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            channels: 3,
            version: 1,
            depth: 8,
            color_mode: 3,
            color_data: Vec::new(),
            resources: Vec::new(),
            merged_alpha: false,
            layers: Vec::new(),
        }
    }

    pub fn layer(mut self, layer: TestLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"8BPS");
        out.extend_from_slice(&self.version.to_be_bytes());
        out.extend_from_slice(&[0; 6]);
        out.extend_from_slice(&self.channels.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.depth.to_be_bytes());
        out.extend_from_slice(&self.color_mode.to_be_bytes());
        push_block(&mut out, &self.color_data);
        push_block(&mut out, &self.resources);

        let mut info = Vec::new();
        let count = self.layers.len() as i16;
        let count = if self.merged_alpha { -count } else { count };
        info.extend_from_slice(&count.to_be_bytes());
        for layer in &self.layers {
            write_record(&mut info, layer);
        }
        for layer in &self.layers {
            for channel in &layer.channels {
                info.extend_from_slice(&channel.encoded);
            }
        }

        // The global layer mask block is left out so the buffer ends with
        // the last byte the decoder reads.
        let mut section = Vec::new();
        push_block(&mut section, &info);
        push_block(&mut out, &section);
        out
    }
}

fn push_block(out: &mut Vec<u8>, block: &[u8]) {
    out.extend_from_slice(&(block.len() as u32).to_be_bytes());
    out.extend_from_slice(block);
}

fn write_record(out: &mut Vec<u8>, layer: &TestLayer) {
    for v in [layer.top, layer.left, layer.bottom, layer.right] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out.extend_from_slice(&(layer.channels.len() as u16).to_be_bytes());
    for channel in &layer.channels {
        out.extend_from_slice(&channel.kind.to_be_bytes());
        let len = channel
            .recorded_len
            .unwrap_or(channel.encoded.len() as u32);
        out.extend_from_slice(&len.to_be_bytes());
    }
    out.extend_from_slice(&layer.signature);
    out.extend_from_slice(&layer.blend);
    out.push(layer.opacity);
    out.push(layer.clipping);
    out.push(layer.flags);
    out.push(0); // filler

    let mut extra = Vec::new();
    push_block(&mut extra, &[]); // mask data
    push_block(&mut extra, &[]); // blending ranges
    extra.push(layer.name.len() as u8);
    extra.extend_from_slice(layer.name.as_bytes());
    while (extra.len() - 8) % 4 != 0 {
        extra.push(0);
    }
    extra.extend_from_slice(&layer.extra);
    push_block(out, &extra);
}

/// A packed pixel with the same value in red, green and blue.
pub fn gray(v: u8) -> u32 {
    u32::from(v) * 0x0001_0101
}
