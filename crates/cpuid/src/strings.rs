//! Vendor and brand string reconstruction.
//!
//! Both strings are rebuilt from fixed words of fixed leaves into
//! fixed-capacity stack buffers; no heap anywhere in this crate.
//!
//! The vendor id word order is EBX, EDX, ECX (not EBX, ECX, EDX); this
//! ordering is part of the published register layout and is load-bearing.

use crate::query::Registers;

// ─────────────────────────────────────────────────────────────────────────────
// Vendor
// ─────────────────────────────────────────────────────────────────────────────

/// CPU vendor identification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Vendor {
  Intel,
  Amd,
  #[default]
  Unknown,
}

impl Vendor {
  /// Returns the human-readable name for this vendor.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Intel => "Intel",
      Self::Amd => "AMD",
      Self::Unknown => "unknown",
    }
  }
}

impl core::fmt::Display for Vendor {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

/// The 12-byte vendor identification string from leaf 0.
///
/// Reconstructed by concatenating EBX, EDX, ECX in that order; the layout
/// interleaves the middle word. `"GenuineIntel"` and `"AuthenticAMD"` are
/// the two recognized encodings; everything else decodes to its raw
/// 12-character form with [`Vendor::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VendorId {
  bytes: [u8; 12],
}

impl VendorId {
  /// All-NUL vendor id: the decode of "nothing reported".
  pub const EMPTY: Self = Self { bytes: [0; 12] };

  /// Reconstruct from a leaf-0 register tuple.
  #[must_use]
  pub fn from_registers(leaf0: &Registers) -> Self {
    let mut bytes = [0u8; 12];
    let (b, rest) = bytes.split_at_mut(4);
    let (d, c) = rest.split_at_mut(4);
    b.copy_from_slice(&leaf0.ebx.to_le_bytes());
    d.copy_from_slice(&leaf0.edx.to_le_bytes());
    c.copy_from_slice(&leaf0.ecx.to_le_bytes());
    Self { bytes }
  }

  /// The raw 12-byte buffer.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 12] {
    &self.bytes
  }

  /// The vendor id as a string, trimmed at the first NUL.
  ///
  /// Returns `""` for tuples that do not decode as UTF-8 (a vendor id is
  /// plain ASCII on every known CPU).
  #[must_use]
  pub fn as_str(&self) -> &str {
    let len = self.bytes.iter().position(|&b| b == 0).unwrap_or(self.bytes.len());
    core::str::from_utf8(&self.bytes[..len]).unwrap_or("")
  }

  /// Map the recognized encodings to a [`Vendor`].
  #[must_use]
  pub fn vendor(&self) -> Vendor {
    match &self.bytes {
      b"GenuineIntel" => Vendor::Intel,
      b"AuthenticAMD" => Vendor::Amd,
      _ => Vendor::Unknown,
    }
  }
}

impl core::fmt::Display for VendorId {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Brand String
// ─────────────────────────────────────────────────────────────────────────────

/// The 48-byte processor brand string from leaves 0x80000002..=0x80000004.
///
/// Each leaf contributes its four words in EAX, EBX, ECX, EDX order. CPUs
/// whose highest extended leaf is below 0x80000004 have no brand string;
/// that decodes as the empty value, not an error.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrandString {
  bytes: [u8; 48],
}

impl BrandString {
  /// The empty brand string.
  pub const EMPTY: Self = Self { bytes: [0; 48] };

  /// Reconstruct from the three extended-leaf tuples.
  #[must_use]
  pub fn from_registers(leaf2: &Registers, leaf3: &Registers, leaf4: &Registers) -> Self {
    let mut bytes = [0u8; 48];
    for (chunk, word) in bytes.chunks_exact_mut(4).zip([
      leaf2.eax, leaf2.ebx, leaf2.ecx, leaf2.edx, leaf3.eax, leaf3.ebx, leaf3.ecx, leaf3.edx, leaf4.eax, leaf4.ebx,
      leaf4.ecx, leaf4.edx,
    ]) {
      chunk.copy_from_slice(&word.to_le_bytes());
    }
    Self { bytes }
  }

  /// The raw 48-byte buffer.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 48] {
    &self.bytes
  }

  /// The brand string, trimmed at the first NUL.
  ///
  /// Brand strings are space-padded ASCII; leading/trailing whitespace is
  /// trimmed. Returns `""` when the buffer is empty or not UTF-8.
  #[must_use]
  pub fn as_str(&self) -> &str {
    let len = self.bytes.iter().position(|&b| b == 0).unwrap_or(self.bytes.len());
    core::str::from_utf8(&self.bytes[..len]).unwrap_or("").trim()
  }

  /// True when no brand string was reported.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.as_str().is_empty()
  }
}

impl core::fmt::Debug for BrandString {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "BrandString({:?})", self.as_str())
  }
}

impl core::fmt::Display for BrandString {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
