//! Deterministic line-anchor tokens.
//!
//! An anchor is a pure function of `(path, old_line, new_line)`. It does not
//! look at line content, so it stays stable even when the suggesting model
//! quotes the surrounding code incorrectly. The token is a fixed-length
//! SHA-256 prefix suffixed with the human-readable old/new pair for
//! debuggability.

use sha2::{Digest, Sha256};

/// Old-line value used for pure additions, which have no old-file position.
pub const OLD_LINE_SENTINEL: u32 = 0;

/// Length of the hex hash prefix kept in the token.
const ANCHOR_HASH_LEN: usize = 16;

/// Computes the anchor token for one addressable line.
///
/// Same triple in, same token out; changing any of the three inputs changes
/// the token.
pub fn line_anchor(path: &str, old_line: u32, new_line: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}:{}", path, old_line, new_line).as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{}-{}-{}", &digest[..ANCHOR_HASH_LEN], old_line, new_line)
}
