//! Fuzz target for snapshot decoding from arbitrary register files.
//!
//! Whatever the hardware reports, including garbage leaves and truncated
//! leaf ranges, decoding must not panic, and the guarded lookups must
//! honor the reported leaf ceilings.

#![no_main]

use arbitrary::Arbitrary;
use cpuid::{CpuInfo, CpuidSource, L2Cache, Registers};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct RawTuple {
  eax: u32,
  ebx: u32,
  ecx: u32,
  edx: u32,
}

#[derive(Arbitrary, Debug)]
struct Input {
  leaf0: RawTuple,
  ext0: RawTuple,
  tuples: Vec<(u32, u32, RawTuple)>,
}

struct FuzzSource {
  leaf0: Registers,
  ext0: Registers,
  tuples: Vec<(u32, u32, Registers)>,
}

impl CpuidSource for FuzzSource {
  fn query(&self, leaf: u32, subleaf: u32) -> Registers {
    match leaf {
      0 => self.leaf0,
      0x8000_0000 => self.ext0,
      _ => self
        .tuples
        .iter()
        .find(|(l, s, _)| *l == leaf && *s == subleaf)
        .map_or(Registers::ZERO, |(_, _, r)| *r),
    }
  }
}

fn regs(raw: &RawTuple) -> Registers {
  Registers::new(raw.eax, raw.ebx, raw.ecx, raw.edx)
}

fuzz_target!(|input: Input| {
  let src = FuzzSource {
    leaf0: regs(&input.leaf0),
    ext0: regs(&input.ext0),
    tuples: input.tuples.iter().map(|(l, s, r)| (*l, *s, regs(r))).collect(),
  };

  let info = CpuInfo::read_with(&src);

  // Decoding is deterministic.
  assert_eq!(info, CpuInfo::read_with(&src));

  // Leaf ceilings are honored: no capability may decode supported when the
  // reported ranges exclude every feature leaf.
  if info.max_leaf() < 1 && info.max_extended_leaf() < 0x8000_0001 {
    assert!(info.caps().is_empty());
  }

  // Extended-leaf guards: absent leaves decode to the absent values.
  if info.max_extended_leaf() < 0x8000_0004 {
    assert!(info.brand().is_empty());
  }
  if info.max_extended_leaf() < 0x8000_0006 {
    assert_eq!(info.l2_cache(), L2Cache::UNKNOWN);
  }

  // String accessors never panic and vendor stays within the recognized set.
  let _ = info.vendor_id().as_str();
  let _ = info.brand().as_str();
  let _ = info.vendor();
});
