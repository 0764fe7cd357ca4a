use crate::Version;

/// Determine the QR code's matrix size in modules for the given `version`.
pub fn matrix_size(version: Version) -> usize {
    17 + version.number() as usize * 4
}

/// Number of module widths between the left edge of the symbol and the end of the top-left finder pattern,
/// separator included.
pub const FINDER_REGION_WIDTH: usize = 8;
