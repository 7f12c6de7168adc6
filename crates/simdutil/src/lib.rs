//! Startup services for SIMD code.
//!
//! `simdutil` bundles the two things vectorized numeric code needs before
//! it runs a single vector instruction: a reliable map of what the
//! executing CPU supports, and buffers whose addresses satisfy the
//! alignment the chosen code path requires. The two components are
//! independent and never call each other.
//!
//! # Quick Start
//!
//! ```
//! use simdutil::{AlignedBuf, CpuInfo, feat};
//!
//! // Pick a code path once, from an explicit snapshot.
//! let info = CpuInfo::read();
//! let lane_bytes = if info.supports(feat::AVX2) { 32 } else { 16 };
//!
//! // Then allocate buffers to match it.
//! let buf = AlignedBuf::new(4096, lane_bytes).expect("allocation failed");
//! assert_eq!(buf.as_ptr() as usize % lane_bytes, 0);
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Enables the cached [`cpuid::get()`] snapshot |
//! | `testing` | No | Exposes `Caps::from_raw`/`as_raw` for downstream tests |
//! | `allocator-api` | No | `core::alloc::Allocator` impl (nightly only) |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! simdutil = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, capability snapshots are constructed explicitly with
//! [`CpuInfo::read`] and passed by value; the allocator is fully available
//! (it depends only on `alloc`).

#![no_std]

// =============================================================================
// Capability Query
// =============================================================================

pub use cpuid;
#[cfg(feature = "std")]
pub use cpuid::get;
pub use cpuid::{BrandString, Caps, CpuInfo, FEATURES, L2Cache, Vendor, VendorId, caps_static, feat};

// =============================================================================
// Aligned Allocator
// =============================================================================

pub use aligned;
#[cfg(feature = "allocator-api")]
pub use aligned::AlignedAlloc;
pub use aligned::{
  AlignedAllocator, AlignedBuf, aligned_alloc, aligned_alloc_array, aligned_free, aligned_free_array,
};
