//! blake3 fingerprints for source files and chunks.

pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Stable id for a chunk: same source, same position, same text, same id.
pub fn chunk_fingerprint(source: &str, seq: usize, chunk_index: usize, content: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(source.as_bytes());
    hasher.update(&[0]);
    hasher.update(&(seq as u64).to_le_bytes());
    hasher.update(&(chunk_index as u64).to_le_bytes());
    hasher.update(content.as_bytes());
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_fingerprint_depends_on_position() {
        let a = chunk_fingerprint("data/hr/a.json", 1, 0, "same text");
        let b = chunk_fingerprint("data/hr/a.json", 2, 0, "same text");
        assert_ne!(a, b);
        assert_eq!(a, chunk_fingerprint("data/hr/a.json", 1, 0, "same text"));
        assert_eq!(a.len(), 64);
    }
}
