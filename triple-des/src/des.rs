//! Data Encryption Standard (DES) block cipher
//!
//! Bit numbering follows FIPS 46-3: bit 1 is the most significant bit of a
//! block. Every 8th key bit is a parity bit and is ignored.

use crate::{error::TripleDesError, BlockCipher, Result};

/// DES block size in bytes
pub const BLOCK_SIZE: usize = 8;

/// DES key size in bytes, parity bits included
pub const KEY_SIZE: usize = 8;

/// Single DES as a [`BlockCipher`] over 8-byte keys and blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Des;

impl Des {
    pub fn new() -> Self {
        Self
    }
}

impl BlockCipher for Des {
    fn encrypt(&self, key: &[u8], block: &[u8]) -> Result<Vec<u8>> {
        let (key, block) = read_args(key, block)?;
        Ok(encrypt(key, block).to_be_bytes().to_vec())
    }

    fn decrypt(&self, key: &[u8], block: &[u8]) -> Result<Vec<u8>> {
        let (key, block) = read_args(key, block)?;
        Ok(decrypt(key, block).to_be_bytes().to_vec())
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}

fn read_args(key: &[u8], block: &[u8]) -> Result<(u64, u64)> {
    let key: [u8; KEY_SIZE] = key
        .try_into()
        .map_err(|_| TripleDesError::InvalidDesKeyLength(key.len()))?;
    let block: [u8; BLOCK_SIZE] = block
        .try_into()
        .map_err(|_| TripleDesError::InvalidDesBlockLength(block.len()))?;
    Ok((u64::from_be_bytes(key), u64::from_be_bytes(block)))
}

/// Encrypts one block with a 64-bit key.
pub fn encrypt(key: u64, block: u64) -> u64 {
    let keys = round_keys(key);
    feistel_network(block, keys.iter())
}

/// Decrypts one block with a 64-bit key.
pub fn decrypt(key: u64, block: u64) -> u64 {
    let keys = round_keys(key);
    feistel_network(block, keys.iter().rev())
}

fn feistel_network<'a>(block: u64, round_keys: impl Iterator<Item = &'a u64>) -> u64 {
    let permuted = permute(&IP, block, 64);
    let mut left = (permuted >> 32) as u32;
    let mut right = permuted as u32;

    for &round_key in round_keys {
        let next = left ^ feistel(right, round_key);
        left = right;
        right = next;
    }

    // The halves are swapped after the last round
    let preoutput = ((right as u64) << 32) | left as u64;
    permute(&FP, preoutput, 64)
}

/// Derives the 16 48-bit round keys.
fn round_keys(key: u64) -> [u64; 16] {
    let permuted = permute(&PC1, key, 64);
    let mut c = (permuted >> 28) & HALF_MASK;
    let mut d = permuted & HALF_MASK;

    let mut keys = [0u64; 16];
    for (round, shift) in SHIFTS.iter().enumerate() {
        c = rotate_half(c, *shift);
        d = rotate_half(d, *shift);
        keys[round] = permute(&PC2, (c << 28) | d, 56);
    }
    keys
}

const HALF_MASK: u64 = 0x0fff_ffff;

fn rotate_half(half: u64, shift: u32) -> u64 {
    ((half << shift) | (half >> (28 - shift))) & HALF_MASK
}

/// The round function f(R, K).
fn feistel(right: u32, round_key: u64) -> u32 {
    let mixed = permute(&E, right as u64, 32) ^ round_key;

    let mut substituted = 0u32;
    for (i, sbox) in SBOXES.iter().enumerate() {
        let six = ((mixed >> (42 - 6 * i)) & 0x3f) as usize;
        let row = ((six & 0x20) >> 4) | (six & 0x01);
        let column = (six >> 1) & 0x0f;
        substituted = (substituted << 4) | sbox[row * 16 + column] as u32;
    }

    permute(&P, substituted as u64, 32) as u32
}

/// Builds a value whose bits are taken from `input` at the (1-based,
/// MSB-first) positions listed in `table`.
fn permute(table: &[u8], input: u64, width: u32) -> u64 {
    table.iter().fold(0u64, |out, &position| {
        (out << 1) | ((input >> (width - position as u32)) & 1)
    })
}

const IP: [u8; 64] = [
    58, 50, 42, 34, 26, 18, 10, 2,
    60, 52, 44, 36, 28, 20, 12, 4,
    62, 54, 46, 38, 30, 22, 14, 6,
    64, 56, 48, 40, 32, 24, 16, 8,
    57, 49, 41, 33, 25, 17, 9, 1,
    59, 51, 43, 35, 27, 19, 11, 3,
    61, 53, 45, 37, 29, 21, 13, 5,
    63, 55, 47, 39, 31, 23, 15, 7,
];

const FP: [u8; 64] = [
    40, 8, 48, 16, 56, 24, 64, 32,
    39, 7, 47, 15, 55, 23, 63, 31,
    38, 6, 46, 14, 54, 22, 62, 30,
    37, 5, 45, 13, 53, 21, 61, 29,
    36, 4, 44, 12, 52, 20, 60, 28,
    35, 3, 43, 11, 51, 19, 59, 27,
    34, 2, 42, 10, 50, 18, 58, 26,
    33, 1, 41, 9, 49, 17, 57, 25,
];

const E: [u8; 48] = [
    32, 1, 2, 3, 4, 5,
    4, 5, 6, 7, 8, 9,
    8, 9, 10, 11, 12, 13,
    12, 13, 14, 15, 16, 17,
    16, 17, 18, 19, 20, 21,
    20, 21, 22, 23, 24, 25,
    24, 25, 26, 27, 28, 29,
    28, 29, 30, 31, 32, 1,
];

const P: [u8; 32] = [
    16, 7, 20, 21, 29, 12, 28, 17,
    1, 15, 23, 26, 5, 18, 31, 10,
    2, 8, 24, 14, 32, 27, 3, 9,
    19, 13, 30, 6, 22, 11, 4, 25,
];

const PC1: [u8; 56] = [
    57, 49, 41, 33, 25, 17, 9,
    1, 58, 50, 42, 34, 26, 18,
    10, 2, 59, 51, 43, 35, 27,
    19, 11, 3, 60, 52, 44, 36,
    63, 55, 47, 39, 31, 23, 15,
    7, 62, 54, 46, 38, 30, 22,
    14, 6, 61, 53, 45, 37, 29,
    21, 13, 5, 28, 20, 12, 4,
];

const PC2: [u8; 48] = [
    14, 17, 11, 24, 1, 5,
    3, 28, 15, 6, 21, 10,
    23, 19, 12, 4, 26, 8,
    16, 7, 27, 20, 13, 2,
    41, 52, 31, 37, 47, 55,
    30, 40, 51, 45, 33, 48,
    44, 49, 39, 56, 34, 53,
    46, 42, 50, 36, 29, 32,
];

const SHIFTS: [u32; 16] = [1, 1, 2, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 1];

const SBOXES: [[u8; 64]; 8] = [
    [
        14, 4, 13, 1, 2, 15, 11, 8, 3, 10, 6, 12, 5, 9, 0, 7,
        0, 15, 7, 4, 14, 2, 13, 1, 10, 6, 12, 11, 9, 5, 3, 8,
        4, 1, 14, 8, 13, 6, 2, 11, 15, 12, 9, 7, 3, 10, 5, 0,
        15, 12, 8, 2, 4, 9, 1, 7, 5, 11, 3, 14, 10, 0, 6, 13,
    ],
    [
        15, 1, 8, 14, 6, 11, 3, 4, 9, 7, 2, 13, 12, 0, 5, 10,
        3, 13, 4, 7, 15, 2, 8, 14, 12, 0, 1, 10, 6, 9, 11, 5,
        0, 14, 7, 11, 10, 4, 13, 1, 5, 8, 12, 6, 9, 3, 2, 15,
        13, 8, 10, 1, 3, 15, 4, 2, 11, 6, 7, 12, 0, 5, 14, 9,
    ],
    [
        10, 0, 9, 14, 6, 3, 15, 5, 1, 13, 12, 7, 11, 4, 2, 8,
        13, 7, 0, 9, 3, 4, 6, 10, 2, 8, 5, 14, 12, 11, 15, 1,
        13, 6, 4, 9, 8, 15, 3, 0, 11, 1, 2, 12, 5, 10, 14, 7,
        1, 10, 13, 0, 6, 9, 8, 7, 4, 15, 14, 3, 11, 5, 2, 12,
    ],
    [
        7, 13, 14, 3, 0, 6, 9, 10, 1, 2, 8, 5, 11, 12, 4, 15,
        13, 8, 11, 5, 6, 15, 0, 3, 4, 7, 2, 12, 1, 10, 14, 9,
        10, 6, 9, 0, 12, 11, 7, 13, 15, 1, 3, 14, 5, 2, 8, 4,
        3, 15, 0, 6, 10, 1, 13, 8, 9, 4, 5, 11, 12, 7, 2, 14,
    ],
    [
        2, 12, 4, 1, 7, 10, 11, 6, 8, 5, 3, 15, 13, 0, 14, 9,
        14, 11, 2, 12, 4, 7, 13, 1, 5, 0, 15, 10, 3, 9, 8, 6,
        4, 2, 1, 11, 10, 13, 7, 8, 15, 9, 12, 5, 6, 3, 0, 14,
        11, 8, 12, 7, 1, 14, 2, 13, 6, 15, 0, 9, 10, 4, 5, 3,
    ],
    [
        12, 1, 10, 15, 9, 2, 6, 8, 0, 13, 3, 4, 14, 7, 5, 11,
        10, 15, 4, 2, 7, 12, 9, 5, 6, 1, 13, 14, 0, 11, 3, 8,
        9, 14, 15, 5, 2, 8, 12, 3, 7, 0, 4, 10, 1, 13, 11, 6,
        4, 3, 2, 12, 9, 5, 15, 10, 11, 14, 1, 7, 6, 0, 8, 13,
    ],
    [
        4, 11, 2, 14, 15, 0, 8, 13, 3, 12, 9, 7, 5, 10, 6, 1,
        13, 0, 11, 7, 4, 9, 1, 10, 14, 3, 5, 12, 2, 15, 8, 6,
        1, 4, 11, 13, 12, 3, 7, 14, 10, 15, 6, 8, 0, 5, 9, 2,
        6, 11, 13, 8, 1, 4, 10, 7, 9, 5, 0, 15, 14, 2, 3, 12,
    ],
    [
        13, 2, 8, 4, 6, 15, 11, 1, 10, 9, 3, 14, 5, 0, 12, 7,
        1, 15, 13, 8, 10, 3, 7, 4, 12, 5, 6, 11, 0, 14, 9, 2,
        7, 11, 4, 1, 9, 12, 14, 2, 0, 6, 10, 13, 15, 3, 5, 8,
        2, 1, 14, 7, 4, 10, 8, 13, 15, 12, 9, 0, 3, 5, 6, 11,
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answer() {
        // Worked example from "The DES Algorithm Illustrated"
        assert_eq!(
            encrypt(0x1334_5779_9BBC_DFF1, 0x0123_4567_89AB_CDEF),
            0x85E8_1354_0F0A_B405
        );
        assert_eq!(
            decrypt(0x1334_5779_9BBC_DFF1, 0x85E8_1354_0F0A_B405),
            0x0123_4567_89AB_CDEF
        );
    }

    #[test]
    fn test_known_answer_zero_output() {
        assert_eq!(encrypt(0x0E32_9232_EA6D_0D73, 0x8787_8787_8787_8787), 0);
    }

    #[test]
    fn test_parity_bits_are_ignored() {
        let key = 0x1334_5779_9BBC_DFF1;
        let flipped = key ^ 0x0101_0101_0101_0101;
        let block = 0x0123_4567_89AB_CDEF;
        assert_eq!(encrypt(key, block), encrypt(flipped, block));
    }

    #[test]
    fn test_round_trip() {
        let key = 0x0123_4567_89AB_CDEF;
        for block in [0u64, u64::MAX, 0x5468_6520_7175_6963, 0xDEAD_BEEF_0BAD_F00D] {
            assert_eq!(decrypt(key, encrypt(key, block)), block);
        }
    }

    #[test]
    fn test_rotate_half() {
        assert_eq!(rotate_half(1, 1), 2);
        assert_eq!(rotate_half(1 << 27, 1), 1);
        assert_eq!(rotate_half(1 << 27, 2), 2);
        assert_eq!(rotate_half(HALF_MASK, 2), HALF_MASK);
    }

    #[test]
    fn test_block_cipher_interface() {
        let des = Des::new();
        let key = [0x13, 0x34, 0x57, 0x79, 0x9B, 0xBC, 0xDF, 0xF1];
        let block = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];

        let encrypted = des.encrypt(&key, &block).unwrap();
        assert_eq!(encrypted, vec![0x85, 0xE8, 0x13, 0x54, 0x0F, 0x0A, 0xB4, 0x05]);
        assert_eq!(des.decrypt(&key, &encrypted).unwrap(), block.to_vec());
        assert_eq!(des.block_size(), 8);
    }

    #[test]
    fn test_block_cipher_rejects_bad_lengths() {
        let des = Des::new();
        assert!(matches!(
            des.encrypt(&[0u8; 7], &[0u8; 8]),
            Err(TripleDesError::InvalidDesKeyLength(7))
        ));
        assert!(matches!(
            des.decrypt(&[0u8; 8], &[0u8; 9]),
            Err(TripleDesError::InvalidDesBlockLength(9))
        ));
    }
}
