//! Canonical inode key derivation.
//!
//! The manifest parser and the apply engine both need to turn an inode
//! number into the string key used in the command map. Keeping this as a
//! single shared function guarantees a manifest-declared inode and an
//! observed-file inode collide exactly when they are equal.

/// Derives the canonical map key for an inode number.
///
/// Lowercase hexadecimal, no leading zeros, no `0x` prefix. This matches
/// the textual form inodes take in manifest lines.
#[must_use]
pub fn inode_key(inode: u64) -> String {
    format!("{inode:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_lowercase_hex() {
        assert_eq!(inode_key(0xabc123), "abc123");
        assert_eq!(inode_key(0xDEADBEEF), "deadbeef");
    }

    #[test]
    fn test_key_has_no_leading_zeros() {
        assert_eq!(inode_key(1), "1");
        assert_eq!(inode_key(0x0000_00ff), "ff");
    }

    #[test]
    fn test_key_round_trips_with_manifest_tokens() {
        // The same rule the parser applies to a manifest token.
        let token = "abc123";
        let parsed = u64::from_str_radix(token, 16).unwrap();
        assert_eq!(inode_key(parsed), token);
    }
}
