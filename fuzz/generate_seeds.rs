#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn be16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn be32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// 2x1 RGB document with one layer whose channels use `compression`.
fn psd(compression: u16, channel: &[u8]) -> Vec<u8> {
    let mut out = b"8BPS".to_vec();
    be16(&mut out, 1);
    out.extend_from_slice(&[0; 6]);
    be16(&mut out, 3); // channels
    be32(&mut out, 1); // height
    be32(&mut out, 2); // width
    be16(&mut out, 8); // depth
    be16(&mut out, 3); // RGB
    be32(&mut out, 0); // color mode data
    be32(&mut out, 0); // image resources

    let mut info = Vec::new();
    be16(&mut info, 1); // layer count
    for v in [0u32, 0, 1, 2] {
        be32(&mut info, v);
    }
    be16(&mut info, 3);
    for kind in 0..3u16 {
        be16(&mut info, kind);
        be32(&mut info, 2 + channel.len() as u32);
    }
    info.extend_from_slice(b"8BIMnorm");
    info.extend_from_slice(&[255, 0, 0, 0]);
    be32(&mut info, 16); // extra data
    be32(&mut info, 0); // mask
    be32(&mut info, 0); // blending ranges
    info.extend_from_slice(b"\x07Layer 1"); // 8-byte padded name
    for _ in 0..3 {
        be16(&mut info, compression);
        info.extend_from_slice(channel);
    }

    be32(&mut out, info.len() as u32 + 4);
    be32(&mut out, info.len() as u32);
    out.extend_from_slice(&info);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/raw_2x1.psd"), psd(0, &[0x10, 0x20])).unwrap();
    // Scanline table (1 row), then a repeat run of 2
    fs::write(format!("{dir}/rle_2x1.psd"), psd(1, &[0, 2, 0xff, 0x30])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"8BPS").unwrap();
    let mut short = psd(0, &[0x10, 0x20]);
    short.truncate(short.len() - 3);
    fs::write(format!("{dir}/truncated.psd"), short).unwrap();

    println!("Generated seed corpus in {dir}/");
}
