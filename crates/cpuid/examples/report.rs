//! CPU capability report: print what the executing CPU supports.
//!
//! Run with: `cargo run --example report -p cpuid`

use cpuid::{CpuInfo, FEATURES};

fn main() {
  let info = CpuInfo::read();

  identity(&info);
  cache_geometry(&info);
  feature_table(&info);
}

/// Vendor and brand identification.
fn identity(info: &CpuInfo) {
  println!("=== CPU Identification ===\n");

  println!("Vendor id:     {}", info.vendor_id());
  println!("Vendor:        {}", info.vendor());
  if info.brand().is_empty() {
    println!("Brand:         (not reported)");
  } else {
    println!("Brand:         {}", info.brand());
  }
  println!("Highest leaf:  {:#x}", info.max_leaf());
  println!("Highest ext:   {:#x}", info.max_extended_leaf());
  println!();
}

/// L2 cache geometry, when the CPU reports it.
fn cache_geometry(info: &CpuInfo) {
  println!("=== L2 Cache ===\n");

  let l2 = info.l2_cache();
  if l2.is_known() {
    println!("Size:          {} KiB", l2.size / 1024);
    println!("Line size:     {} bytes", l2.line_size);
  } else {
    println!("Not reported by this CPU");
  }
  println!();
}

/// One line per feature predicate.
fn feature_table(info: &CpuInfo) {
  println!("=== Instruction-Set Extensions ===\n");

  for spec in FEATURES {
    let verdict = if info.supports(spec.caps) {
      "supported"
    } else {
      "not supported"
    };
    println!("{:<18} {verdict}", spec.name);
  }
}
