#![no_main]

use libfuzzer_sys::fuzz_target;
use octets::{ByteReader, Width};

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Input bytes drive a bounded sequence of reads over the same input.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 7;
        let arg = usize::from(data[idx] >> 3);
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_u16();
            }
            2 => {
                let _ = reader.read_uint(Width::U32);
            }
            3 => {
                let _ = reader.read_u64();
            }
            4 => {
                let _ = reader.read_cstr(arg);
            }
            5 => {
                if let Ok(mut inner) = reader.split_to(arg) {
                    let _ = inner.read_rest();
                }
            }
            _ => {
                let _ = reader.skip(arg);
            }
        }
    }
});
