use sha1::{Digest, Sha1};

pub const HASH_ALGORITHM: &str = "sha1";

/// Content address of a policy document: `sha1:<hex>`.
///
/// The digest depends **only** on the bytes given. Callers hash the exact
/// bytes they parse, so an edited profile always yields a new hash.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    let digest = hasher.finalize();

    format!("{HASH_ALGORITHM}:{}", hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_has_algorithm_prefix_and_known_digest() {
        // echo -n "abc" | sha1sum
        assert_eq!(
            content_hash(b"abc"),
            "sha1:a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn empty_input_hashes_to_empty_digest() {
        assert_eq!(
            content_hash(b""),
            "sha1:da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn single_byte_edit_changes_hash() {
        let a = content_hash(b"version: 1\n");
        let b = content_hash(b"version: 2\n");
        assert_ne!(a, b);
    }
}
