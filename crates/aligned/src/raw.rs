//! Raw aligned allocate/free.
//!
//! Thin wrappers over the global allocator with `Layout` as the uniform
//! platform interface. Failure is a null return, never a panic; release
//! must go through the matching free with the same size/alignment pair,
//! exactly once; the allocator's bookkeeping depends on the layout and
//! does not cross-validate pointer origin.

use core::{alloc::Layout, mem, ptr};

use alloc::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};

/// A well-aligned, non-null, non-dereferenceable pointer for zero-size
/// requests. Null when `alignment` is not a power of two.
#[inline]
fn dangling(alignment: usize) -> *mut u8 {
  if alignment.is_power_of_two() {
    alignment as *mut u8
  } else {
    ptr::null_mut()
  }
}

/// Allocate `n_bytes` of uninitialized memory whose address is a multiple
/// of `alignment`.
///
/// Returns null, never panics, when `alignment` is not a power of two,
/// the size overflows the address space, or the allocator fails. A zero
/// `n_bytes` is a defined boundary: the result is a well-aligned non-null
/// pointer that must not be dereferenced (and is accepted by
/// [`aligned_free`]).
///
/// Every non-null result must be released exactly once via
/// [`aligned_free`] with the same `n_bytes` and `alignment`.
#[allow(unsafe_code)]
#[must_use]
pub fn aligned_alloc(n_bytes: usize, alignment: usize) -> *mut u8 {
  if n_bytes == 0 {
    return dangling(alignment);
  }
  match Layout::from_size_align(n_bytes, alignment) {
    // SAFETY: the layout has nonzero size.
    Ok(layout) => unsafe { raw_alloc(layout) },
    Err(_) => ptr::null_mut(),
  }
}

/// Release memory obtained from [`aligned_alloc`].
///
/// Null pointers and zero-size blocks are accepted and ignored.
///
/// # Safety
///
/// `ptr` must have come from [`aligned_alloc`] (or the array variant, via
/// its byte size) with exactly this `n_bytes`/`alignment` pair, and must
/// not be released twice. Pointers from any other allocation source are
/// undefined behavior.
#[allow(unsafe_code)]
pub unsafe fn aligned_free(ptr: *mut u8, n_bytes: usize, alignment: usize) {
  if ptr.is_null() || n_bytes == 0 {
    return;
  }
  if let Ok(layout) = Layout::from_size_align(n_bytes, alignment) {
    // SAFETY: caller guarantees the pointer was allocated with this exact
    // layout and has not been freed.
    unsafe { raw_dealloc(ptr, layout) }
  }
}

/// Allocate an uninitialized array of `count` elements of `T` at the given
/// alignment.
///
/// The element-count byte size is computed with checked math; overflow
/// returns null rather than wrapping. `alignment` must be a power of two
/// no smaller than `align_of::<T>()`; anything else returns null, since a
/// pointer to under-aligned `T` could never be used. Pass
/// `align_of::<T>()` for the type's natural alignment.
///
/// `count == 0` returns a well-aligned non-null pointer that must not be
/// dereferenced.
#[must_use]
pub fn aligned_alloc_array<T>(count: usize, alignment: usize) -> *mut T {
  if !alignment.is_power_of_two() || alignment < mem::align_of::<T>() {
    return ptr::null_mut();
  }
  match count.checked_mul(mem::size_of::<T>()) {
    Some(n_bytes) => aligned_alloc(n_bytes, alignment).cast(),
    None => ptr::null_mut(),
  }
}

/// Release an array obtained from [`aligned_alloc_array`].
///
/// # Safety
///
/// Same contract as [`aligned_free`]: matching `count`/`alignment`, one
/// release per allocation, no foreign pointers.
#[allow(unsafe_code)]
pub unsafe fn aligned_free_array<T>(ptr: *mut T, count: usize, alignment: usize) {
  // If the allocation succeeded, this multiply did not overflow.
  let n_bytes = count.saturating_mul(mem::size_of::<T>());
  // SAFETY: forwarded caller contract.
  unsafe { aligned_free(ptr.cast(), n_bytes, alignment) }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unsafe_code, clippy::undocumented_unsafe_blocks)]
mod tests {
  use super::*;

  #[test]
  fn alloc_respects_alignment() {
    for alignment in [1usize, 2, 4, 8, 16, 32, 64, 128, 4096] {
      let p = aligned_alloc(257, alignment);
      assert!(!p.is_null());
      assert_eq!(p as usize % alignment, 0, "misaligned at alignment {alignment}");
      unsafe { aligned_free(p, 257, alignment) };
    }
  }

  #[test]
  fn non_power_of_two_alignment_is_null() {
    assert!(aligned_alloc(64, 0).is_null());
    assert!(aligned_alloc(64, 3).is_null());
    assert!(aligned_alloc(64, 48).is_null());
    assert!(aligned_alloc(0, 3).is_null());
  }

  #[test]
  fn zero_bytes_is_a_defined_boundary() {
    let p = aligned_alloc(0, 64);
    assert!(!p.is_null());
    assert_eq!(p as usize % 64, 0);
    // Accepted and ignored.
    unsafe { aligned_free(p, 0, 64) };
  }

  #[test]
  fn free_ignores_null() {
    unsafe { aligned_free(core::ptr::null_mut(), 64, 64) };
  }

  #[test]
  fn oversized_request_is_null() {
    assert!(aligned_alloc(usize::MAX - 64, 64).is_null());
  }

  #[test]
  fn array_roundtrip() {
    let p: *mut u64 = aligned_alloc_array(32, 64);
    assert!(!p.is_null());
    assert_eq!(p as usize % 64, 0);
    for i in 0..32 {
      unsafe { p.add(i).write(i as u64) };
    }
    for i in 0..32 {
      assert_eq!(unsafe { p.add(i).read() }, i as u64);
    }
    unsafe { aligned_free_array(p, 32, 64) };
  }

  #[test]
  fn array_count_overflow_is_null() {
    let p: *mut u64 = aligned_alloc_array(usize::MAX / 4, 64);
    assert!(p.is_null());
  }

  #[test]
  fn array_underaligned_request_is_null() {
    // 2-byte alignment cannot hold a u64.
    let p: *mut u64 = aligned_alloc_array(4, 2);
    assert!(p.is_null());
  }

  #[test]
  fn array_zero_count_is_a_defined_boundary() {
    let p: *mut u32 = aligned_alloc_array(0, 16);
    assert!(!p.is_null());
    assert_eq!(p as usize % 16, 0);
    unsafe { aligned_free_array(p, 0, 16) };
  }

  #[test]
  fn interleaved_allocations_do_not_corrupt() {
    let a = aligned_alloc(96, 32);
    let b = aligned_alloc(96, 32);
    assert!(!a.is_null() && !b.is_null());
    unsafe {
      core::ptr::write_bytes(a, 0xaa, 96);
      core::ptr::write_bytes(b, 0xbb, 96);
      assert_eq!(a.read(), 0xaa);
      assert_eq!(b.read(), 0xbb);
      aligned_free(a, 96, 32);
      assert_eq!(b.add(95).read(), 0xbb);
      aligned_free(b, 96, 32);
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Property-Based Tests (proptest)
// ─────────────────────────────────────────────────────────────────────────────
