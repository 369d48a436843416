#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let container = arith::compress_to_vec(data).unwrap();
    let restored = arith::decompress_from_slice(&container).unwrap();
    assert_eq!(data, restored.as_slice());

    // the raw input doubles as a hostile container: error or success,
    // never a panic
    let _ = arith::decompress_from_slice(data);
});
