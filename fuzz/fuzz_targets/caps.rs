//! Fuzz target for Caps bitset operations.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Union/intersection are commutative
//! - has() is consistent with has_bit()
//! - count() matches popcount of the underlying word
//! - Self-containment: caps.has(caps) is always true

#![no_main]

use cpuid::Caps;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u64, u64)| {
  let (a, b) = data;
  let caps = Caps::from_raw(a);
  let other = Caps::from_raw(b);

  // ─── Invariant: Self-containment ───
  assert!(caps.has(caps), "caps must contain itself");

  // ─── Invariant: Count accuracy ───
  assert_eq!(caps.count(), a.count_ones(), "count() must equal popcount");

  // ─── Invariant: is_empty consistency ───
  assert_eq!(caps.is_empty(), a == 0, "is_empty() must match count() == 0");

  // ─── Invariant: Union identity ───
  assert_eq!(caps | Caps::NONE, caps, "union with NONE must be identity");

  // ─── Invariant: Intersection absorbing ───
  assert_eq!(caps & Caps::NONE, Caps::NONE, "intersection with NONE must be NONE");

  // ─── Invariant: Commutativity ───
  assert_eq!(caps | other, other | caps);
  assert_eq!(caps & other, other & caps);

  // ─── Invariant: Difference removes exactly the intersection ───
  let diff = caps.difference(other);
  assert_eq!(diff & other, Caps::NONE);
  assert_eq!(diff | (caps & other), caps);

  // ─── Invariant: has_bit consistency ───
  for n in 0u8..64 {
    assert_eq!(
      caps.has_bit(n),
      caps.has(Caps::bit(n)),
      "has_bit({n}) must equal has(Caps::bit({n}))"
    );
  }
});
