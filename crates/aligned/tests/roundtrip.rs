//! Alloc/free round-trip stress and adapter-equality properties.

#![allow(unsafe_code, clippy::undocumented_unsafe_blocks)]

use aligned::{AlignedAllocator, AlignedBuf, aligned_alloc, aligned_alloc_array, aligned_free, aligned_free_array};

/// Repeated alloc/free at varying sizes and alignments: every non-null
/// result is aligned, and freeing never corrupts live neighbors.
#[test]
fn stress_roundtrip() {
  const SIZES: &[usize] = &[1, 2, 3, 7, 8, 15, 16, 31, 64, 255, 256, 1023, 4096, 65537];
  const ALIGNMENTS: &[usize] = &[8, 16, 32, 64];

  for round in 0u8..8 {
    let mut live = Vec::new();
    for &n_bytes in SIZES {
      for &alignment in ALIGNMENTS {
        let p = aligned_alloc(n_bytes, alignment);
        assert!(!p.is_null(), "alloc({n_bytes}, {alignment}) failed");
        assert_eq!(p as usize % alignment, 0, "misaligned block ({n_bytes}, {alignment})");
        unsafe { core::ptr::write_bytes(p, round, n_bytes) };
        live.push((p, n_bytes, alignment));
      }
    }

    // Free every other block, then verify the survivors still carry their
    // fill pattern before releasing them too.
    for (i, &(p, n_bytes, alignment)) in live.iter().enumerate() {
      if i % 2 == 0 {
        unsafe { aligned_free(p, n_bytes, alignment) };
      }
    }
    for (i, &(p, n_bytes, _)) in live.iter().enumerate() {
      if i % 2 == 1 {
        unsafe {
          assert_eq!(p.read(), round);
          assert_eq!(p.add(n_bytes - 1).read(), round);
        }
      }
    }
    for (i, &(p, n_bytes, alignment)) in live.iter().enumerate() {
      if i % 2 == 1 {
        unsafe { aligned_free(p, n_bytes, alignment) };
      }
    }
  }
}

#[test]
fn typed_array_roundtrip() {
  let p: *mut f32 = aligned_alloc_array(1024, 32);
  assert!(!p.is_null());
  assert_eq!(p as usize % 32, 0);
  for i in 0..1024 {
    unsafe { p.add(i).write(i as f32) };
  }
  let sum: f32 = (0..1024).map(|i| unsafe { p.add(i).read() }).sum();
  assert_eq!(sum, (0..1024).map(|i| i as f32).sum());
  unsafe { aligned_free_array(p, 1024, 32) };
}

#[test]
fn zero_count_array_is_defined() {
  let p: *mut u64 = aligned_alloc_array(0, 64);
  assert!(!p.is_null());
  assert_eq!(p as usize % 64, 0);
  unsafe { aligned_free_array(p, 0, 64) };
}

/// equal ⇔ alignment1 == alignment2, across element types.
#[test]
fn adapter_equality_matrix() {
  let a16 = AlignedAllocator::<u32, 16>::new();
  let b16 = AlignedAllocator::<[u8; 3], 16>::new();
  let a32 = AlignedAllocator::<u32, 32>::new();
  let b32 = AlignedAllocator::<f64, 32>::new();
  let a64 = AlignedAllocator::<u128, 64>::new();

  // Same alignment, any element type: equal.
  assert!(a16 == b16);
  assert!(a32 == b32);

  // Different alignments: unequal, in both directions.
  assert!(a16 != a32);
  assert!(a32 != a16);
  assert!(b16 != b32);
  assert!(a16 != a64);
  assert!(a32 != a64);
}

/// A container can hand storage from one adapter instance to any equal one.
#[test]
fn adapter_storage_exchange() {
  let writer = AlignedAllocator::<u64, 64>::new();
  let reader = AlignedAllocator::<u64, 64>::new();
  assert!(writer == reader);

  let ptr = writer.allocate(64);
  for i in 0..64 {
    unsafe { ptr.as_ptr().add(i).write(i as u64) };
  }
  for i in 0..64 {
    assert_eq!(unsafe { ptr.as_ptr().add(i).read() }, i as u64);
  }
  unsafe { reader.deallocate(ptr, 64) };
}

#[test]
fn buffers_and_raw_blocks_coexist() {
  let mut bufs = Vec::new();
  for i in 0..32 {
    let mut buf = AlignedBuf::new(64 * (i + 1), 64).unwrap();
    buf.as_mut_slice().fill(i as u8);
    bufs.push(buf);
  }
  let raw = aligned_alloc(4096, 64);
  assert!(!raw.is_null());
  unsafe { core::ptr::write_bytes(raw, 0xee, 4096) };

  for (i, buf) in bufs.iter().enumerate() {
    assert!(buf.as_slice().iter().all(|&b| b == i as u8));
  }
  unsafe {
    assert_eq!(raw.read(), 0xee);
    aligned_free(raw, 4096, 64);
  }
}
