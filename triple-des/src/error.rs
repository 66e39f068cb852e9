//! Error types for Triple DES operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripleDesError {
    #[error("Invalid key material length: {bits} bits (must be 112, 128, 168 or 192)")]
    InvalidKeyLength { bits: usize },

    #[error("Invalid block length: {bits} bits (must be 64)")]
    InvalidBlockLength { bits: usize },

    #[error("Invalid DES key length: {0} bytes (must be 8)")]
    InvalidDesKeyLength(usize),

    #[error("Invalid DES block length: {0} bytes (must be 8)")]
    InvalidDesBlockLength(usize),

    #[error("Bit range {start}..{start}+{length} out of bounds for {available} bits")]
    BitRange {
        start: usize,
        length: usize,
        available: usize,
    },

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Cipher produced {bits} bits instead of a 64-bit block")]
    OutputLength { bits: usize },
}

pub type Result<T> = std::result::Result<T, TripleDesError>;
