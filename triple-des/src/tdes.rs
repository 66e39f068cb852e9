//! Triple DES in EDE form

use crate::{
    bits::BitArray,
    des::{self, Des},
    error::{Result, TripleDesError},
    schedule::KeySchedule,
    BlockCipher,
};

/// One 64-bit data block.
pub type Block = [u8; des::BLOCK_SIZE];

const BLOCK_BITS: usize = des::BLOCK_SIZE * 8;

/// Triple DES built on top of a single-DES [`BlockCipher`].
///
/// Encryption is `E(K3, D(K2, E(K1, P)))` and decryption is its inverse,
/// `D(K1, E(K2, D(K3, C)))`. Every operation calls the underlying cipher
/// exactly three times.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleDes<C = Des> {
    cipher: C,
}

impl TripleDes<Des> {
    pub fn new() -> Self {
        Self { cipher: Des }
    }
}

impl<C: BlockCipher> TripleDes<C> {
    /// Uses `cipher` as the single-DES primitive.
    pub fn with_cipher(cipher: C) -> Self {
        Self { cipher }
    }

    pub fn encrypt_block(&self, schedule: &KeySchedule, plaintext: &Block) -> Result<Block> {
        let t1 = self.cipher.encrypt(schedule.k1(), plaintext)?;
        let t2 = self.cipher.decrypt(schedule.k2(), &t1)?;
        let ciphertext = self.cipher.encrypt(schedule.k3(), &t2)?;
        into_block(ciphertext)
    }

    pub fn decrypt_block(&self, schedule: &KeySchedule, ciphertext: &Block) -> Result<Block> {
        let t1 = self.cipher.decrypt(schedule.k3(), ciphertext)?;
        let t2 = self.cipher.encrypt(schedule.k2(), &t1)?;
        let plaintext = self.cipher.decrypt(schedule.k1(), &t2)?;
        into_block(plaintext)
    }

    /// Encrypts one 64-bit block with 112, 128, 168 or 192 bits of key
    /// material.
    ///
    /// Both inputs are validated before the cipher is called.
    pub fn encrypt_bits(&self, key_material: &BitArray, plaintext: &BitArray) -> Result<BitArray> {
        let schedule = KeySchedule::from_bits(key_material)?;
        let block = read_block(plaintext)?;
        tracing::trace!(two_key = schedule.is_two_key(), "triple DES encrypt");

        let ciphertext = self.encrypt_block(&schedule, &block)?;
        Ok(BitArray::from_bytes(&ciphertext))
    }

    /// Decrypts one 64-bit block. See [`TripleDes::encrypt_bits`].
    pub fn decrypt_bits(&self, key_material: &BitArray, ciphertext: &BitArray) -> Result<BitArray> {
        let schedule = KeySchedule::from_bits(key_material)?;
        let block = read_block(ciphertext)?;
        tracing::trace!(two_key = schedule.is_two_key(), "triple DES decrypt");

        let plaintext = self.decrypt_block(&schedule, &block)?;
        Ok(BitArray::from_bytes(&plaintext))
    }
}

/// Key material as bytes (14, 16, 21 or 24) and 8-byte blocks, so that
/// Triple DES can stand in wherever a DES-like cipher is consumed.
impl<C: BlockCipher> BlockCipher for TripleDes<C> {
    fn encrypt(&self, key: &[u8], block: &[u8]) -> Result<Vec<u8>> {
        let schedule = KeySchedule::from_bytes(key)?;
        let block = read_block(&BitArray::from_bytes(block))?;
        Ok(self.encrypt_block(&schedule, &block)?.to_vec())
    }

    fn decrypt(&self, key: &[u8], block: &[u8]) -> Result<Vec<u8>> {
        let schedule = KeySchedule::from_bytes(key)?;
        let block = read_block(&BitArray::from_bytes(block))?;
        Ok(self.decrypt_block(&schedule, &block)?.to_vec())
    }

    fn block_size(&self) -> usize {
        des::BLOCK_SIZE
    }
}

/// Encrypts one block with the built-in DES implementation.
pub fn encrypt(key_material: &BitArray, plaintext: &BitArray) -> Result<BitArray> {
    TripleDes::new().encrypt_bits(key_material, plaintext)
}

/// Decrypts one block with the built-in DES implementation.
pub fn decrypt(key_material: &BitArray, ciphertext: &BitArray) -> Result<BitArray> {
    TripleDes::new().decrypt_bits(key_material, ciphertext)
}

fn read_block(data: &BitArray) -> Result<Block> {
    if data.len() != BLOCK_BITS {
        return Err(TripleDesError::InvalidBlockLength { bits: data.len() });
    }

    into_block(data.to_bytes())
}

fn into_block(bytes: Vec<u8>) -> Result<Block> {
    let bits = bytes.len() * 8;
    bytes
        .try_into()
        .map_err(|_| TripleDesError::OutputLength { bits })
}
