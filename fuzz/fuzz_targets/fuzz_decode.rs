#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and full decode must never panic
    let _ = zenpsd::PsdInfo::from_bytes(data);

    // Keep canvas allocations bounded; layer buffers are canvas-sized.
    let limits = zenpsd::Limits {
        max_pixels: Some(1 << 20),
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let _ = zenpsd::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
