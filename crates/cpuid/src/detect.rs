//! Snapshot construction and caching.
//!
//! [`CpuInfo`] is the immutable feature bundle: capabilities, vendor id,
//! brand string, and L2 cache geometry, read in one guarded batch of
//! queries. It is constructed by an explicit call, never by a hidden
//! global constructor, and passed around by value; [`get()`] memoizes one
//! hardware read for callers that want the cached convenience.
//!
//! # Guards
//!
//! Register contents are undefined for leaves beyond the highest reported
//! index, so construction always reads leaf 0 and leaf 0x8000_0000 first
//! and only issues in-range queries. Out-of-range lookups decode to their
//! absent values: `false` bits, empty strings, the `(-1, -1)` cache
//! sentinel.

use crate::{
  caps::Caps,
  features::FEATURES,
  query::{CpuidSource, HardwareCpuid, Registers},
  strings::{BrandString, Vendor, VendorId},
};

// ─────────────────────────────────────────────────────────────────────────────
// L2 Cache Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// L2 cache geometry from extended leaf 0x80000006.
///
/// Both fields are byte counts. CPUs whose highest extended leaf is below
/// 0x80000006 report [`L2Cache::UNKNOWN`], a normal outcome on some
/// hardware, not a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct L2Cache {
  /// Total L2 size in bytes, or -1 when not reported.
  pub size: i32,
  /// Cache line size in bytes, or -1 when not reported.
  pub line_size: i32,
}

impl L2Cache {
  /// Sentinel for CPUs that do not expose leaf 0x80000006.
  pub const UNKNOWN: Self = Self {
    size: -1,
    line_size: -1,
  };

  /// Decode leaf 0x80000006 ECX: size is the KB count in the top half
  /// scaled to bytes, line size the low byte.
  #[inline]
  #[must_use]
  pub const fn from_ecx(ecx: u32) -> Self {
    Self {
      size: ((ecx & 0xffff_0000) >> 6) as i32,
      line_size: (ecx & 0xff) as i32,
    }
  }

  /// True when the CPU reported its L2 geometry.
  #[inline]
  #[must_use]
  pub const fn is_known(&self) -> bool {
    self.size >= 0
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// CpuInfo Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable snapshot of the executing CPU's identity and capabilities.
///
/// Construct once with [`CpuInfo::read`] (or [`CpuInfo::read_with`] from a
/// custom source), then pass by value; the type is `Copy` and all queries
/// on it are pure lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuInfo {
  caps: Caps,
  vendor: Vendor,
  vendor_id: VendorId,
  brand: BrandString,
  l2: L2Cache,
  max_leaf: u32,
  max_extended_leaf: u32,
}

impl CpuInfo {
  /// Read a snapshot from the executing CPU.
  ///
  /// One batch of guarded queries; no caching (see [`get()`] for the
  /// memoized path). On non-x86 targets every capability decodes absent.
  #[must_use]
  pub fn read() -> Self {
    Self::read_with(&HardwareCpuid)
  }

  /// Read a snapshot from an arbitrary register source.
  ///
  /// This is the testing seam: substitute a fake source to exercise any
  /// decode deterministically.
  #[must_use]
  pub fn read_with(src: &impl CpuidSource) -> Self {
    let leaf0 = src.query(0, 0);
    let max_leaf = leaf0.eax;
    let vendor_id = VendorId::from_registers(&leaf0);
    let vendor = vendor_id.vendor();

    let ext0 = src.query(0x8000_0000, 0);
    let max_extended_leaf = ext0.eax;

    let leaf1 = if max_leaf >= 1 { src.query(1, 0) } else { Registers::ZERO };
    let leaf7 = if max_leaf >= 7 { src.query(7, 0) } else { Registers::ZERO };
    let ext1 = if max_extended_leaf >= 0x8000_0001 {
      src.query(0x8000_0001, 0)
    } else {
      Registers::ZERO
    };

    let mut caps = Caps::NONE;
    for spec in FEATURES {
      let regs = match (spec.leaf, spec.subleaf) {
        (1, 0) => &leaf1,
        (7, 0) => &leaf7,
        (0x8000_0001, 0) => &ext1,
        // A table row outside the batched tuples would be a table bug;
        // decode it as absent rather than issuing an unguarded query.
        _ => &Registers::ZERO,
      };
      if spec.gate.admits(vendor) && spec.test(regs) {
        caps |= spec.caps;
      }
    }

    let brand = if max_extended_leaf >= 0x8000_0004 {
      BrandString::from_registers(
        &src.query(0x8000_0002, 0),
        &src.query(0x8000_0003, 0),
        &src.query(0x8000_0004, 0),
      )
    } else {
      BrandString::EMPTY
    };

    let l2 = if max_extended_leaf >= 0x8000_0006 {
      L2Cache::from_ecx(src.query(0x8000_0006, 0).ecx)
    } else {
      L2Cache::UNKNOWN
    };

    Self {
      caps,
      vendor,
      vendor_id,
      brand,
      l2,
      max_leaf,
      max_extended_leaf,
    }
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn supports(&self, required: Caps) -> bool {
    self.caps.has(required)
  }

  /// The full capability bitset.
  #[inline]
  #[must_use]
  pub const fn caps(&self) -> Caps {
    self.caps
  }

  /// Recognized vendor.
  #[inline]
  #[must_use]
  pub const fn vendor(&self) -> Vendor {
    self.vendor
  }

  /// Raw 12-character vendor id.
  #[inline]
  #[must_use]
  pub const fn vendor_id(&self) -> &VendorId {
    &self.vendor_id
  }

  /// Processor brand string; empty when not reported.
  #[inline]
  #[must_use]
  pub const fn brand(&self) -> &BrandString {
    &self.brand
  }

  /// L2 cache geometry; `(-1, -1)` when not reported.
  #[inline]
  #[must_use]
  pub const fn l2_cache(&self) -> L2Cache {
    self.l2
  }

  /// Highest valid basic leaf index.
  #[inline]
  #[must_use]
  pub const fn max_leaf(&self) -> u32 {
    self.max_leaf
  }

  /// Highest valid extended leaf index.
  #[inline]
  #[must_use]
  pub const fn max_extended_leaf(&self) -> u32 {
    self.max_extended_leaf
  }

  #[inline]
  #[must_use]
  pub const fn is_intel(&self) -> bool {
    matches!(self.vendor, Vendor::Intel)
  }

  #[inline]
  #[must_use]
  pub const fn is_amd(&self) -> bool {
    matches!(self.vendor, Vendor::Amd)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached Entry Point
// ─────────────────────────────────────────────────────────────────────────────

/// Get the cached snapshot of the executing CPU.
///
/// The first call reads the hardware; subsequent calls return the memoized
/// value. The snapshot itself is a plain value; callers that want to avoid
/// process-wide state entirely can use [`CpuInfo::read`] and pass the
/// result explicitly.
#[cfg(feature = "std")]
#[inline]
#[must_use]
pub fn get() -> CpuInfo {
  use std::sync::OnceLock;

  static CACHED: OnceLock<CpuInfo> = OnceLock::new();
  *CACHED.get_or_init(CpuInfo::read)
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Floor
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the capabilities known at compile time.
///
/// Decodes features enabled via `-C target-feature=...` or
/// `-C target-cpu=...`. The result is `const`; the compiler eliminates all
/// runtime checks. Runtime detection on the same machine always reports a
/// superset of this floor.
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_macros)] // only expanded on x86/x86_64
  macro_rules! detect {
    ($caps:ident; $($feature:literal => $cap:expr),+ $(,)?) => {
      $(if cfg!(target_feature = $feature) { $caps = $caps.union($cap); })+
    };
  }

  #[allow(unused_mut)]
  let mut caps = Caps::NONE;

  // x86_64 baseline: these are architectural on every 64-bit part.
  #[cfg(target_arch = "x86_64")]
  {
    use crate::feat;
    caps = caps
      .union(feat::MMX)
      .union(feat::FXSR)
      .union(feat::SSE)
      .union(feat::SSE2)
      .union(feat::CMOV);
  }

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    use crate::feat;
    detect!(caps;
      "mmx" => feat::MMX,
      "fxsr" => feat::FXSR,
      "sse" => feat::SSE,
      "sse2" => feat::SSE2,
      "sse3" => feat::SSE3,
      "ssse3" => feat::SSSE3,
      "sse4.1" => feat::SSE41,
      "sse4.2" => feat::SSE42,
      "sse4a" => feat::SSE4A,
      "avx" => feat::AVX,
      "avx2" => feat::AVX2,
      "fma" => feat::FMA,
      "f16c" => feat::F16C,
      "aes" => feat::AES,
      "pclmulqdq" => feat::PCLMULQDQ,
      "sha" => feat::SHA,
      "bmi1" => feat::BMI1,
      "bmi2" => feat::BMI2,
      "popcnt" => feat::POPCNT,
      "lzcnt" => feat::LZCNT,
      "movbe" => feat::MOVBE,
      "xsave" => feat::XSAVE,
      "cmpxchg16b" => feat::CMPXCHG16B,
      "rdrand" => feat::RDRAND,
      "rdseed" => feat::RDSEED,
      "adx" => feat::ADX,
      "avx512f" => feat::AVX512F,
      "avx512bw" => feat::AVX512BW,
      "avx512cd" => feat::AVX512CD,
      "avx512dq" => feat::AVX512DQ,
      "avx512vl" => feat::AVX512VL,
      "avx512ifma" => feat::AVX512IFMA,
      "avx512vbmi" => feat::AVX512VBMI,
      "avx512vbmi2" => feat::AVX512VBMI2,
      "avx512vnni" => feat::AVX512VNNI,
      "avx512bitalg" => feat::AVX512BITALG,
      "avx512vpopcntdq" => feat::AVX512VPOPCNTDQ,
    );
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
