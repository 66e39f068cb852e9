//! Generic block cipher trait

use crate::error::Result;

/// Trait for a keyed block cipher primitive.
///
/// Implementations must be stateless: the same key and block always give
/// the same output, and calls may happen concurrently.
pub trait BlockCipher {
    /// Encrypts a single block
    fn encrypt(&self, key: &[u8], block: &[u8]) -> Result<Vec<u8>>;

    /// Decrypts a single block
    fn decrypt(&self, key: &[u8], block: &[u8]) -> Result<Vec<u8>>;

    /// Returns the block size of the cipher in bytes
    fn block_size(&self) -> usize;
}
