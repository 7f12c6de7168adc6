//! x86 instruction-set capability queries for SIMD dispatch.
//!
//! This crate decodes the CPU's identification registers into named boolean
//! feature predicates, a vendor id, a brand string, and L2 cache geometry,
//! so numeric code can pick a vector code path at startup. It never throws,
//! blocks, or allocates: every output is a fixed-size stack value, and
//! feature absence is a normal decode (`false`, `""`, `(-1, -1)`), not an
//! error.
//!
//! # Quick Start
//!
//! ```
//! use cpuid::{CpuInfo, feat};
//!
//! let info = CpuInfo::read();
//! if info.supports(feat::AVX2 | feat::FMA) {
//!     // 256-bit FMA path
//! } else if info.supports(feat::SSE2) {
//!     // 128-bit path
//! }
//! println!("{} / {}", info.vendor_id(), info.brand());
//! ```
//!
//! # Design
//!
//! 1. **One primitive**: all decoding flows through a single raw query
//!    signature ([`CpuidSource`]) with one implementation per target.
//! 2. **Declarative table**: every predicate is one row of
//!    [`features::FEATURES`], a static {name -> (leaf, sub-leaf, word,
//!    bit, vendor gate)} mapping. Vendor quirks occupy exactly one gate
//!    per row.
//! 3. **Explicit snapshot**: [`CpuInfo::read`] computes the full bundle in
//!    one guarded batch and returns an immutable value callers pass
//!    around. [`get()`] memoizes one read for convenience; there is no
//!    hidden load-time singleton.
//! 4. **Compile-time floor**: [`caps_static()`] decodes
//!    `-C target-feature` flags in `const` context.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Enables the cached [`get()`] entry point |
//! | `testing` | No | Exposes `Caps::from_raw`/`as_raw` for downstream tests |

#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;
pub mod features;
pub mod query;
mod strings;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::Caps;
#[cfg(feature = "std")]
pub use detect::get;
pub use detect::{CpuInfo, L2Cache, caps_static};
pub use features::{FEATURES, FeatureSpec, Gate, feat};
pub use query::{CpuidSource, HardwareCpuid, Reg, Registers, leaf, leaf_subleaf};
pub use strings::{BrandString, Vendor, VendorId};
