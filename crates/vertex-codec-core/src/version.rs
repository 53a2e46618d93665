// Record format version constants.
//
// Every serialized record starts with a magic tag and a version pair so a
// decoder can refuse layouts it does not understand instead of misreading
// them. Payloads are round-trip tokens, not a stable interchange format:
// a new major version may drop support for older records.

/// Magic bytes at the start of every serialized record.
pub const RECORD_MAGIC: &[u8; 4] = b"VTXR";

/// Latest major version of the record layout.
pub const RECORD_VERSION_MAJOR: u8 = 1;

/// Latest minor version of the record layout.
pub const RECORD_VERSION_MINOR: u8 = 0;

/// Version written by the encoder.
pub const DEFAULT_RECORD_VERSION: (u8, u8) = (RECORD_VERSION_MAJOR, RECORD_VERSION_MINOR);

/// Size of the fixed part of the header: magic, version pair, format tag and
/// the u32 scale. The point count varint follows.
pub const RECORD_FIXED_HEADER_SIZE: usize = RECORD_MAGIC.len() + 2 + 1 + 4;

/// Checks if the given version is at least the target version.
/// Returns true if (major, minor) >= (target_major, target_minor).
#[inline]
pub fn version_at_least(major: u8, minor: u8, target: (u8, u8)) -> bool {
    major > target.0 || (major == target.0 && minor >= target.1)
}

/// Records are readable when the major version matches; minor bumps only
/// add layouts behind new format tags.
#[inline]
pub fn is_supported_version(major: u8, _minor: u8) -> bool {
    major == RECORD_VERSION_MAJOR
}
