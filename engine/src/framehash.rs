use sha2::{Digest, Sha256};

/// Collapses an RGBA frame to a stable hex digest.
///
/// Render tests compare digests of two draws of the same state instead of
/// pinning absolute golden images, so they stay valid across palette tweaks.
pub fn frame_digest(frame: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(frame);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_frames_hash_equal() {
        let frame = vec![7u8; 64];
        assert_eq!(frame_digest(&frame), frame_digest(&frame.clone()));
    }

    #[test]
    fn single_pixel_change_alters_digest() {
        let frame = vec![0u8; 64];
        let mut changed = frame.clone();
        changed[13] = 1;
        assert_ne!(frame_digest(&frame), frame_digest(&changed));
    }
}
