//! Primitives consumed by the sharing core: a CSPRNG, BLAKE2b and a zero
//! detector.
//!
//! The core only ever reaches randomness through the [`Prng`] seam so that
//! a [`Context`](crate::Context) can be built around a deterministic source
//! in tests. [`random_bytes`] is the default source.

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use rand_core::{OsRng, RngCore};

use crate::error::{Error, Result};

/// Default BLAKE2b digest size in bytes.
pub const BLAKE2B_SIZE: usize = 32;

/// Largest digest BLAKE2b can produce.
const BLAKE2B_MAX_SIZE: usize = 64;

/// A source of random bytes: `(size) -> bytes`.
///
/// Any `Fn(usize) -> Result<Vec<u8>>` closure qualifies.
pub trait Prng: Send + Sync {
    fn random_bytes(&self, size: usize) -> Result<Vec<u8>>;
}

impl<F> Prng for F
where
    F: Fn(usize) -> Result<Vec<u8>> + Send + Sync,
{
    fn random_bytes(&self, size: usize) -> Result<Vec<u8>> {
        self(size)
    }
}

/// Fill a fresh `size`-byte buffer from the operating system CSPRNG.
pub fn random_bytes(size: usize) -> Result<Vec<u8>> {
    if size == 0 {
        return Err(Error::argument("random_bytes: size must be larger than 0"));
    }
    let mut buf = vec![0u8; size];
    OsRng.try_fill_bytes(&mut buf)?;
    Ok(buf)
}

/// BLAKE2b digest of the concatenation of `buffers`, `size` bytes long.
///
/// Every buffer must be non-empty and `size` must be in `1..=64`.
pub fn blake2b(buffers: &[&[u8]], size: usize) -> Result<Vec<u8>> {
    if size == 0 || size > BLAKE2B_MAX_SIZE {
        return Err(Error::argument(format!(
            "blake2b: size must be in 1..={BLAKE2B_MAX_SIZE}, got {size}"
        )));
    }
    if buffers.is_empty() {
        return Err(Error::argument("blake2b: expecting at least one buffer"));
    }

    let mut hasher = Blake2bVar::new(size)
        .map_err(|_| Error::argument(format!("blake2b: unsupported size {size}")))?;
    for (i, buf) in buffers.iter().enumerate() {
        if buf.is_empty() {
            return Err(Error::argument(format!("blake2b: buffer at index {i} is empty")));
        }
        hasher.update(buf);
    }

    let mut digest = vec![0u8; size];
    hasher
        .finalize_variable(&mut digest)
        .map_err(|_| Error::argument("blake2b: digest buffer size mismatch"))?;
    Ok(digest)
}

/// True when every byte is zero. An empty slice counts as zero.
pub fn is_zero_buffer(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}
