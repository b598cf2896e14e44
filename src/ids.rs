// src/ids.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// 15 random bytes encode to 20 URL-safe characters, the same length as
/// the document ids already in the store.
pub const DEFAULT_ID_BYTES: usize = 15;

/// Opaque id for a new document, drawn from the OS RNG.
pub fn generate_id_default() -> String {
    let mut rng = OsRng;
    generate_id(&mut rng, DEFAULT_ID_BYTES)
}

/// URL-safe base64 of `nbytes` random bytes, no padding.
pub fn generate_id<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}
