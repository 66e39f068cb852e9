//! # Triple DES Library
//!
//! This library implements Triple DES (3DES) in its EDE form: a 64-bit block
//! is encrypted with DES under K1, decrypted under K2 and encrypted again
//! under K3. Decryption applies the inverse steps in reverse order.
//!
//! ## Key material
//!
//! - **Three-key** (3TDEA) - 168 key bits, K1, K2 and K3 independent
//! - **Two-key** (2TDEA) - 112 key bits, K3 is K1
//!
//! Keys may be given with parity bits (16 or 24 bytes) or packed without
//! them (14 or 21 bytes).
//!
//! ## Usage
//!
//! ```rust
//! use triple_des::BitArray;
//!
//! let key = BitArray::from_hex("0123456789abcdef 23456789abcdef01 456789abcdef0123")?;
//! let plaintext = BitArray::from_hex("5468652071756663")?;
//!
//! let ciphertext = triple_des::encrypt(&key, &plaintext)?;
//! assert_eq!(ciphertext.to_string(), "a826fd8ce53b855f");
//!
//! let decrypted = triple_des::decrypt(&key, &ciphertext)?;
//! assert_eq!(decrypted, plaintext);
//! # Ok::<(), triple_des::TripleDesError>(())
//! ```
//!
//! ## Features
//!
//! - Generic `BlockCipher` trait, so any single-DES implementation can be plugged in
//! - Reference DES implementation following FIPS 46-3
//! - Inputs are validated before any cipher call

// Public modules
pub mod bits;
pub mod cipher;
pub mod des;
pub mod error;
pub mod schedule;
pub mod tdes;

// Re-exports for easy access
pub use bits::BitArray;
pub use cipher::BlockCipher;
pub use des::Des;
pub use error::{Result, TripleDesError};
pub use schedule::{DesKey, KeySchedule};
pub use tdes::{decrypt, encrypt, Block, TripleDes};
