//! Fuzz target for aligned alloc/free round trips.
//!
//! Tests that:
//! - No panics on arbitrary (size, alignment) requests
//! - Every non-null block satisfies its requested alignment
//! - Blocks are writable over their full extent
//! - Release never corrupts the allocator

#![no_main]

use aligned::{aligned_alloc, aligned_free, AlignedBuf};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Request {
  size: u16,
  align_exp: u8,
  raw_alignment: usize,
}

fuzz_target!(|requests: Vec<Request>| {
  let mut live = Vec::new();

  for req in &requests {
    // Power-of-two path: must succeed for sane sizes.
    let alignment = 1usize << (req.align_exp % 13);
    let size = req.size as usize;

    let p = aligned_alloc(size, alignment);
    assert!(!p.is_null());
    assert_eq!(p as usize % alignment, 0);
    if size > 0 {
      unsafe {
        p.write(0xa5);
        p.add(size - 1).write(0x5a);
      }
    }
    live.push((p, size, alignment));

    // Arbitrary-alignment path: never panics; non-power-of-two is null.
    let q = aligned_alloc(size, req.raw_alignment);
    if req.raw_alignment.is_power_of_two() {
      assert!(!q.is_null());
      unsafe { aligned_free(q, size, req.raw_alignment) };
    } else {
      assert!(q.is_null());
    }

    // Owning buffer agrees with the raw layer.
    if let Some(buf) = AlignedBuf::new(size, alignment) {
      assert_eq!(buf.as_ptr() as usize % alignment, 0);
      assert_eq!(buf.len(), size);
    }
  }

  for (p, size, alignment) in live {
    unsafe { aligned_free(p, size, alignment) };
  }
});
