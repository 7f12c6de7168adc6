//! The static feature table.
//!
//! Every named predicate is one row here: a [`Caps`] bit, a display name,
//! the (leaf, sub-leaf, register word, bit index) coordinate it decodes,
//! and a vendor gate for the handful of bits whose meaning depends on who
//! made the CPU. The table is invariant at runtime and must match the
//! published instruction-identification layout exactly; it is the single
//! source of truth for decoding, for diagnostics, and for the per-predicate
//! test suite.

use crate::{
  caps::Caps,
  query::{Reg, Registers},
  strings::Vendor,
};

// ─────────────────────────────────────────────────────────────────────────────
// Named Capability Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Named capability constants, one per feature predicate.
///
/// Combine with `|` to express multi-feature requirements:
/// `feat::AVX2 | feat::FMA`.
pub mod feat {
  use super::Caps;

  // ─── Leaf 1 EDX: legacy SIMD and base ISA ───
  pub const MMX: Caps = Caps::bit(0);
  pub const FXSR: Caps = Caps::bit(1);
  pub const SSE: Caps = Caps::bit(2);
  pub const SSE2: Caps = Caps::bit(3);
  pub const CMOV: Caps = Caps::bit(4);
  pub const CLFSH: Caps = Caps::bit(5);

  // ─── Leaf 1 ECX: SSE3 through AVX ───
  pub const SSE3: Caps = Caps::bit(6);
  pub const PCLMULQDQ: Caps = Caps::bit(7);
  pub const MONITOR: Caps = Caps::bit(8);
  pub const SSSE3: Caps = Caps::bit(9);
  pub const FMA: Caps = Caps::bit(10);
  pub const CMPXCHG16B: Caps = Caps::bit(11);
  pub const SSE41: Caps = Caps::bit(12);
  pub const SSE42: Caps = Caps::bit(13);
  pub const MOVBE: Caps = Caps::bit(14);
  pub const POPCNT: Caps = Caps::bit(15);
  pub const AES: Caps = Caps::bit(16);
  pub const XSAVE: Caps = Caps::bit(17);
  pub const OSXSAVE: Caps = Caps::bit(18);
  pub const AVX: Caps = Caps::bit(19);
  pub const F16C: Caps = Caps::bit(20);
  pub const RDRAND: Caps = Caps::bit(21);

  // ─── Leaf 7.0 EBX: AVX2, AVX-512 foundation, bit manipulation ───
  pub const FSGSBASE: Caps = Caps::bit(22);
  pub const BMI1: Caps = Caps::bit(23);
  pub const HLE: Caps = Caps::bit(24); // Intel only
  pub const AVX2: Caps = Caps::bit(25);
  pub const BMI2: Caps = Caps::bit(26);
  pub const ERMS: Caps = Caps::bit(27);
  pub const INVPCID: Caps = Caps::bit(28);
  pub const RTM: Caps = Caps::bit(29); // Intel only
  pub const AVX512F: Caps = Caps::bit(30);
  pub const AVX512DQ: Caps = Caps::bit(31);
  pub const RDSEED: Caps = Caps::bit(32);
  pub const ADX: Caps = Caps::bit(33);
  pub const AVX512IFMA: Caps = Caps::bit(34);
  pub const AVX512PF: Caps = Caps::bit(35);
  pub const AVX512ER: Caps = Caps::bit(36);
  pub const AVX512CD: Caps = Caps::bit(37);
  pub const SHA: Caps = Caps::bit(38);
  pub const AVX512BW: Caps = Caps::bit(39);
  pub const AVX512VL: Caps = Caps::bit(40);

  // ─── Leaf 7.0 ECX: AVX-512 extended ───
  pub const PREFETCHWT1: Caps = Caps::bit(41);
  pub const AVX512VBMI: Caps = Caps::bit(42);
  pub const AVX512VBMI2: Caps = Caps::bit(43);
  pub const AVX512VNNI: Caps = Caps::bit(44);
  pub const AVX512BITALG: Caps = Caps::bit(45);
  pub const AVX512VPOPCNTDQ: Caps = Caps::bit(46);

  // ─── Leaf 7.0 EDX: Knights Mill extensions ───
  pub const AVX512_4VNNIW: Caps = Caps::bit(47);
  pub const AVX512_4FMAPS: Caps = Caps::bit(48);

  // ─── Leaf 0x80000001 ECX ───
  pub const LAHF: Caps = Caps::bit(49);
  pub const LZCNT: Caps = Caps::bit(50); // Intel only
  pub const ABM: Caps = Caps::bit(51); // AMD only (same bit as LZCNT)
  pub const SSE4A: Caps = Caps::bit(52); // AMD only
  pub const XOP: Caps = Caps::bit(53); // AMD only
  pub const TBM: Caps = Caps::bit(54); // AMD only

  // ─── Leaf 0x80000001 EDX ───
  pub const SYSCALL: Caps = Caps::bit(55); // Intel only
  pub const MMXEXT: Caps = Caps::bit(56); // AMD only
  pub const RDTSCP: Caps = Caps::bit(57); // Intel only
  pub const THREEDNOWEXT: Caps = Caps::bit(58); // AMD only
  pub const THREEDNOW: Caps = Caps::bit(59); // AMD only

  // ─── Combined Capability Masks ───
  // Common feature combinations for dispatch decisions.

  /// 128-bit integer SIMD baseline: SSE2 + SSSE3.
  pub const SSE_READY: Caps = Caps(SSE2.0 | SSSE3.0);

  /// 256-bit SIMD with fused multiply-add: AVX2 + FMA.
  pub const AVX2_FMA_READY: Caps = Caps(AVX2.0 | FMA.0);

  /// AVX-512 foundation as shipped on server parts: F + BW + DQ + VL + CD.
  pub const AVX512_READY: Caps = Caps(AVX512F.0 | AVX512BW.0 | AVX512DQ.0 | AVX512VL.0 | AVX512CD.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature Specifications
// ─────────────────────────────────────────────────────────────────────────────

/// Vendor gate for bits whose meaning is vendor-specific.
///
/// This is the one conditional a vendor quirk is allowed to occupy: the
/// gate is applied during decoding, nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
  /// Bit is architectural; any vendor.
  Any,
  /// Bit is defined only on AMD parts.
  AmdOnly,
  /// Bit is defined only on Intel parts.
  IntelOnly,
}

impl Gate {
  /// Does `vendor` satisfy this gate?
  #[inline]
  #[must_use]
  pub const fn admits(self, vendor: Vendor) -> bool {
    match self {
      Self::Any => true,
      Self::AmdOnly => matches!(vendor, Vendor::Amd),
      Self::IntelOnly => matches!(vendor, Vendor::Intel),
    }
  }
}

/// One row of the feature table: the full
/// {name -> (leaf, sub-leaf, word, bit, gate)} mapping for one predicate.
#[derive(Clone, Copy, Debug)]
pub struct FeatureSpec {
  /// The capability bit this predicate sets.
  pub caps: Caps,
  /// Lower-case display name.
  pub name: &'static str,
  /// Identification leaf the bit lives in.
  pub leaf: u32,
  /// Sub-leaf (0 for every current row; kept explicit because the
  /// coordinate space includes it).
  pub subleaf: u32,
  /// Register word within the tuple.
  pub reg: Reg,
  /// Bit index within the word.
  pub bit: u8,
  /// Vendor gate.
  pub gate: Gate,
}

impl FeatureSpec {
  const fn new(caps: Caps, name: &'static str, leaf: u32, subleaf: u32, reg: Reg, bit: u8, gate: Gate) -> Self {
    Self {
      caps,
      name,
      leaf,
      subleaf,
      reg,
      bit,
      gate,
    }
  }

  /// Test this row's bit within a register tuple (gate not applied).
  #[inline]
  #[must_use]
  pub const fn test(&self, regs: &Registers) -> bool {
    regs.bit(self.reg, self.bit)
  }
}

/// The complete feature table.
///
/// Row order groups by source tuple; the decode walks this table once per
/// snapshot construction.
pub const FEATURES: &[FeatureSpec] = &[
  // ─── Leaf 1 EDX ───
  FeatureSpec::new(feat::CMOV, "cmov", 1, 0, Reg::Edx, 15, Gate::Any),
  FeatureSpec::new(feat::CLFSH, "clfsh", 1, 0, Reg::Edx, 19, Gate::Any),
  FeatureSpec::new(feat::MMX, "mmx", 1, 0, Reg::Edx, 23, Gate::Any),
  FeatureSpec::new(feat::FXSR, "fxsr", 1, 0, Reg::Edx, 24, Gate::Any),
  FeatureSpec::new(feat::SSE, "sse", 1, 0, Reg::Edx, 25, Gate::Any),
  FeatureSpec::new(feat::SSE2, "sse2", 1, 0, Reg::Edx, 26, Gate::Any),
  // ─── Leaf 1 ECX ───
  FeatureSpec::new(feat::SSE3, "sse3", 1, 0, Reg::Ecx, 0, Gate::Any),
  FeatureSpec::new(feat::PCLMULQDQ, "pclmulqdq", 1, 0, Reg::Ecx, 1, Gate::Any),
  FeatureSpec::new(feat::MONITOR, "monitor", 1, 0, Reg::Ecx, 3, Gate::Any),
  FeatureSpec::new(feat::SSSE3, "ssse3", 1, 0, Reg::Ecx, 9, Gate::Any),
  FeatureSpec::new(feat::FMA, "fma", 1, 0, Reg::Ecx, 12, Gate::Any),
  FeatureSpec::new(feat::CMPXCHG16B, "cmpxchg16b", 1, 0, Reg::Ecx, 13, Gate::Any),
  FeatureSpec::new(feat::SSE41, "sse4.1", 1, 0, Reg::Ecx, 19, Gate::Any),
  FeatureSpec::new(feat::SSE42, "sse4.2", 1, 0, Reg::Ecx, 20, Gate::Any),
  FeatureSpec::new(feat::MOVBE, "movbe", 1, 0, Reg::Ecx, 22, Gate::Any),
  FeatureSpec::new(feat::POPCNT, "popcnt", 1, 0, Reg::Ecx, 23, Gate::Any),
  FeatureSpec::new(feat::AES, "aes", 1, 0, Reg::Ecx, 25, Gate::Any),
  FeatureSpec::new(feat::XSAVE, "xsave", 1, 0, Reg::Ecx, 26, Gate::Any),
  FeatureSpec::new(feat::OSXSAVE, "osxsave", 1, 0, Reg::Ecx, 27, Gate::Any),
  FeatureSpec::new(feat::AVX, "avx", 1, 0, Reg::Ecx, 28, Gate::Any),
  FeatureSpec::new(feat::F16C, "f16c", 1, 0, Reg::Ecx, 29, Gate::Any),
  FeatureSpec::new(feat::RDRAND, "rdrand", 1, 0, Reg::Ecx, 30, Gate::Any),
  // ─── Leaf 7.0 EBX ───
  FeatureSpec::new(feat::FSGSBASE, "fsgsbase", 7, 0, Reg::Ebx, 0, Gate::Any),
  FeatureSpec::new(feat::BMI1, "bmi1", 7, 0, Reg::Ebx, 3, Gate::Any),
  FeatureSpec::new(feat::HLE, "hle", 7, 0, Reg::Ebx, 4, Gate::IntelOnly),
  FeatureSpec::new(feat::AVX2, "avx2", 7, 0, Reg::Ebx, 5, Gate::Any),
  FeatureSpec::new(feat::BMI2, "bmi2", 7, 0, Reg::Ebx, 8, Gate::Any),
  FeatureSpec::new(feat::ERMS, "erms", 7, 0, Reg::Ebx, 9, Gate::Any),
  FeatureSpec::new(feat::INVPCID, "invpcid", 7, 0, Reg::Ebx, 10, Gate::Any),
  FeatureSpec::new(feat::RTM, "rtm", 7, 0, Reg::Ebx, 11, Gate::IntelOnly),
  FeatureSpec::new(feat::AVX512F, "avx512f", 7, 0, Reg::Ebx, 16, Gate::Any),
  FeatureSpec::new(feat::AVX512DQ, "avx512dq", 7, 0, Reg::Ebx, 17, Gate::Any),
  FeatureSpec::new(feat::RDSEED, "rdseed", 7, 0, Reg::Ebx, 18, Gate::Any),
  FeatureSpec::new(feat::ADX, "adx", 7, 0, Reg::Ebx, 19, Gate::Any),
  FeatureSpec::new(feat::AVX512IFMA, "avx512ifma", 7, 0, Reg::Ebx, 21, Gate::Any),
  FeatureSpec::new(feat::AVX512PF, "avx512pf", 7, 0, Reg::Ebx, 26, Gate::Any),
  FeatureSpec::new(feat::AVX512ER, "avx512er", 7, 0, Reg::Ebx, 27, Gate::Any),
  FeatureSpec::new(feat::AVX512CD, "avx512cd", 7, 0, Reg::Ebx, 28, Gate::Any),
  FeatureSpec::new(feat::SHA, "sha", 7, 0, Reg::Ebx, 29, Gate::Any),
  FeatureSpec::new(feat::AVX512BW, "avx512bw", 7, 0, Reg::Ebx, 30, Gate::Any),
  FeatureSpec::new(feat::AVX512VL, "avx512vl", 7, 0, Reg::Ebx, 31, Gate::Any),
  // ─── Leaf 7.0 ECX ───
  FeatureSpec::new(feat::PREFETCHWT1, "prefetchwt1", 7, 0, Reg::Ecx, 0, Gate::Any),
  FeatureSpec::new(feat::AVX512VBMI, "avx512vbmi", 7, 0, Reg::Ecx, 1, Gate::Any),
  FeatureSpec::new(feat::AVX512VBMI2, "avx512vbmi2", 7, 0, Reg::Ecx, 6, Gate::Any),
  // VNNI is bit 11, not a second decode of VBMI2's bit 6.
  FeatureSpec::new(feat::AVX512VNNI, "avx512vnni", 7, 0, Reg::Ecx, 11, Gate::Any),
  FeatureSpec::new(feat::AVX512BITALG, "avx512bitalg", 7, 0, Reg::Ecx, 12, Gate::Any),
  FeatureSpec::new(feat::AVX512VPOPCNTDQ, "avx512vpopcntdq", 7, 0, Reg::Ecx, 14, Gate::Any),
  // ─── Leaf 7.0 EDX ───
  FeatureSpec::new(feat::AVX512_4VNNIW, "avx512-4vnniw", 7, 0, Reg::Edx, 2, Gate::Any),
  FeatureSpec::new(feat::AVX512_4FMAPS, "avx512-4fmaps", 7, 0, Reg::Edx, 3, Gate::Any),
  // ─── Leaf 0x80000001 ECX ───
  FeatureSpec::new(feat::LAHF, "lahf", 0x8000_0001, 0, Reg::Ecx, 0, Gate::Any),
  FeatureSpec::new(feat::LZCNT, "lzcnt", 0x8000_0001, 0, Reg::Ecx, 5, Gate::IntelOnly),
  FeatureSpec::new(feat::ABM, "abm", 0x8000_0001, 0, Reg::Ecx, 5, Gate::AmdOnly),
  FeatureSpec::new(feat::SSE4A, "sse4a", 0x8000_0001, 0, Reg::Ecx, 6, Gate::AmdOnly),
  FeatureSpec::new(feat::XOP, "xop", 0x8000_0001, 0, Reg::Ecx, 11, Gate::AmdOnly),
  FeatureSpec::new(feat::TBM, "tbm", 0x8000_0001, 0, Reg::Ecx, 21, Gate::AmdOnly),
  // ─── Leaf 0x80000001 EDX ───
  FeatureSpec::new(feat::SYSCALL, "syscall", 0x8000_0001, 0, Reg::Edx, 11, Gate::IntelOnly),
  FeatureSpec::new(feat::MMXEXT, "mmxext", 0x8000_0001, 0, Reg::Edx, 22, Gate::AmdOnly),
  FeatureSpec::new(feat::RDTSCP, "rdtscp", 0x8000_0001, 0, Reg::Edx, 27, Gate::IntelOnly),
  FeatureSpec::new(feat::THREEDNOWEXT, "3dnowext", 0x8000_0001, 0, Reg::Edx, 30, Gate::AmdOnly),
  FeatureSpec::new(feat::THREEDNOW, "3dnow", 0x8000_0001, 0, Reg::Edx, 31, Gate::AmdOnly),
];

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::collections::BTreeSet;

  use super::*;

  #[test]
  fn every_row_sets_exactly_one_bit() {
    for spec in FEATURES {
      assert_eq!(spec.caps.count(), 1, "{} must map to a single capability bit", spec.name);
    }
  }

  #[test]
  fn capability_bits_are_unique() {
    let mut seen = BTreeSet::new();
    for spec in FEATURES {
      assert!(seen.insert(spec.caps.as_raw()), "{} reuses a capability bit", spec.name);
    }
  }

  #[test]
  fn names_are_unique_and_lowercase() {
    let mut seen = BTreeSet::new();
    for spec in FEATURES {
      assert!(seen.insert(spec.name), "duplicate name {}", spec.name);
      assert_eq!(spec.name, spec.name.to_lowercase());
    }
  }

  #[test]
  fn coordinates_are_in_range() {
    for spec in FEATURES {
      assert!(spec.bit < 32, "{} bit index out of register range", spec.name);
      assert_eq!(spec.subleaf, 0, "{}: only sub-leaf 0 rows exist today", spec.name);
      assert!(
        matches!(spec.leaf, 1 | 7 | 0x8000_0001),
        "{} references an unexpected leaf",
        spec.name
      );
    }
  }

  #[test]
  fn shared_coordinates_differ_by_gate() {
    // LZCNT (Intel) and ABM (AMD) intentionally decode the same bit; any
    // other coordinate collision is a table error.
    for (i, a) in FEATURES.iter().enumerate() {
      for b in FEATURES.iter().skip(i + 1) {
        let same_coord = a.leaf == b.leaf && a.subleaf == b.subleaf && a.reg == b.reg && a.bit == b.bit;
        if same_coord {
          assert_ne!(
            a.gate, b.gate,
            "{} and {} share a coordinate without distinct vendor gates",
            a.name, b.name
          );
        }
      }
    }
  }

  #[test]
  fn test_extracts_the_declared_bit() {
    for spec in FEATURES {
      let mut regs = Registers::ZERO;
      match spec.reg {
        Reg::Eax => regs.eax = 1 << spec.bit,
        Reg::Ebx => regs.ebx = 1 << spec.bit,
        Reg::Ecx => regs.ecx = 1 << spec.bit,
        Reg::Edx => regs.edx = 1 << spec.bit,
      }
      assert!(spec.test(&regs), "{} did not see its own bit", spec.name);
      assert!(!spec.test(&Registers::ZERO), "{} saw a bit in a zero tuple", spec.name);
    }
  }

  #[test]
  fn vnni_and_vbmi2_are_distinct_coordinates() {
    let vnni = FEATURES.iter().find(|s| s.name == "avx512vnni").unwrap();
    let vbmi2 = FEATURES.iter().find(|s| s.name == "avx512vbmi2").unwrap();
    assert_eq!(vnni.bit, 11);
    assert_eq!(vbmi2.bit, 6);
  }

  #[test]
  fn gates_admit_expected_vendors() {
    assert!(Gate::Any.admits(Vendor::Unknown));
    assert!(Gate::AmdOnly.admits(Vendor::Amd));
    assert!(!Gate::AmdOnly.admits(Vendor::Intel));
    assert!(!Gate::AmdOnly.admits(Vendor::Unknown));
    assert!(Gate::IntelOnly.admits(Vendor::Intel));
    assert!(!Gate::IntelOnly.admits(Vendor::Amd));
  }

  #[test]
  fn combined_masks_cover_their_parts() {
    assert!(feat::AVX512_READY.has(feat::AVX512F));
    assert!(feat::AVX512_READY.has(feat::AVX512BW));
    assert!(feat::AVX512_READY.has(feat::AVX512VL));
    assert!(feat::AVX2_FMA_READY.has(feat::AVX2));
    assert!(feat::AVX2_FMA_READY.has(feat::FMA));
    assert!(feat::SSE_READY.has(feat::SSE2));
  }
}
