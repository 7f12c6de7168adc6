//! Aligned memory allocation for SIMD buffers.
//!
//! Vector loads and stores fault or slow down on misaligned addresses;
//! this crate hands out blocks whose start address is a multiple of a
//! caller-chosen power-of-two alignment. Three surfaces, smallest first:
//!
//! - [`aligned_alloc`] / [`aligned_free`]: the raw pair. Null on failure,
//!   never panics; release requires the matching size/alignment pair,
//!   exactly once.
//! - [`AlignedAllocator`]: a container adapter with the alignment pinned
//!   at the type level. Allocation failure diverges through the global
//!   out-of-memory handler (the contract generic containers expect);
//!   two adapters compare equal iff their alignments match, regardless
//!   of element type.
//! - [`AlignedBuf`]: a single-ownership RAII block that releases itself
//!   exactly once on drop.
//!
//! # Quick Start
//!
//! ```
//! use aligned::AlignedBuf;
//!
//! // One cache line's worth of 64-byte-aligned scratch space.
//! let mut buf = AlignedBuf::new(64, 64).expect("allocation failed");
//! assert_eq!(buf.as_ptr() as usize % 64, 0);
//! buf.as_mut_slice().fill(0x5a);
//! // Dropped here; released through the matching aligned free.
//! ```
//!
//! # Failure styles
//!
//! The raw layer reports failure by returning null; the adapter raises the
//! allocation-error signal instead. The two styles are deliberately kept
//! distinct: callers of the raw pair branch on null; containers assume
//! allocation either succeeds or diverges.
//!
//! Feature absence elsewhere in this workspace is a normal decode; here the
//! only failure is genuine allocation failure, and the global allocator is
//! the platform primitive throughout.

// Fallibility discipline: deny unwrap/expect in production, allow in tests.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![cfg_attr(feature = "allocator-api", feature(allocator_api))]
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Modules
// ─────────────────────────────────────────────────────────────────────────────

mod adapter;
mod buf;
mod raw;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "allocator-api")]
pub use adapter::AlignedAlloc;
pub use adapter::AlignedAllocator;
pub use buf::AlignedBuf;
pub use raw::{aligned_alloc, aligned_alloc_array, aligned_free, aligned_free_array};
