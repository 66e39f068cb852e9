//! Splitting Triple DES key material into DES sub-keys

use std::fmt;

use crate::{
    bits::BitArray,
    des,
    error::{Result, TripleDesError},
};

/// A single 64-bit DES key, parity bits included.
pub type DesKey = [u8; des::KEY_SIZE];

const DES_KEY_BITS: usize = des::KEY_SIZE * 8;

/// Effective key bits of a DES key (parity bits excluded).
const PACKED_KEY_BITS: usize = 56;

/// The sub-keys K1, K2 and K3 derived from one block of key material.
///
/// Two-key material (2TDEA) reuses K1 as K3.
#[derive(Clone, PartialEq, Eq)]
pub enum KeySchedule {
    TwoKey { k1: DesKey, k2: DesKey },
    ThreeKey { k1: DesKey, k2: DesKey, k3: DesKey },
}

impl KeySchedule {
    /// Splits key material into sub-keys.
    ///
    /// Accepted lengths:
    ///
    /// * 128 or 192 bits: two or three consecutive 64-bit DES keys, each
    ///   carrying its parity bits.
    /// * 112 or 168 bits: two or three consecutive 56-bit keys without
    ///   parity bits. Each is widened to 64 bits by inserting an odd parity
    ///   bit after every 7 key bits.
    pub fn from_bits(key_material: &BitArray) -> Result<Self> {
        let bits = key_material.len();
        let schedule = match bits {
            128 => KeySchedule::TwoKey {
                k1: slice_key(key_material, 0)?,
                k2: slice_key(key_material, DES_KEY_BITS)?,
            },
            192 => KeySchedule::ThreeKey {
                k1: slice_key(key_material, 0)?,
                k2: slice_key(key_material, DES_KEY_BITS)?,
                k3: slice_key(key_material, 2 * DES_KEY_BITS)?,
            },
            112 => KeySchedule::TwoKey {
                k1: widen_key(key_material, 0)?,
                k2: widen_key(key_material, PACKED_KEY_BITS)?,
            },
            168 => KeySchedule::ThreeKey {
                k1: widen_key(key_material, 0)?,
                k2: widen_key(key_material, PACKED_KEY_BITS)?,
                k3: widen_key(key_material, 2 * PACKED_KEY_BITS)?,
            },
            _ => {
                tracing::debug!(bits, "rejecting triple DES key material");
                return Err(TripleDesError::InvalidKeyLength { bits });
            }
        };

        tracing::trace!(bits, two_key = schedule.is_two_key(), "derived triple DES key schedule");
        Ok(schedule)
    }

    /// Splits byte-aligned key material (14, 16, 21 or 24 bytes).
    pub fn from_bytes(key_material: &[u8]) -> Result<Self> {
        Self::from_bits(&BitArray::from_bytes(key_material))
    }

    pub fn is_two_key(&self) -> bool {
        matches!(self, KeySchedule::TwoKey { .. })
    }

    pub fn k1(&self) -> &DesKey {
        match self {
            KeySchedule::TwoKey { k1, .. } | KeySchedule::ThreeKey { k1, .. } => k1,
        }
    }

    pub fn k2(&self) -> &DesKey {
        match self {
            KeySchedule::TwoKey { k2, .. } | KeySchedule::ThreeKey { k2, .. } => k2,
        }
    }

    /// K3, which is K1 for two-key material.
    pub fn k3(&self) -> &DesKey {
        match self {
            KeySchedule::TwoKey { k1, .. } => k1,
            KeySchedule::ThreeKey { k3, .. } => k3,
        }
    }
}

// Key bytes never end up in logs or panic messages.
impl fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySchedule::TwoKey { .. } => f.debug_struct("TwoKey").finish_non_exhaustive(),
            KeySchedule::ThreeKey { .. } => f.debug_struct("ThreeKey").finish_non_exhaustive(),
        }
    }
}

fn slice_key(key_material: &BitArray, start: usize) -> Result<DesKey> {
    let mut key = BitArray::create(DES_KEY_BITS);
    key.copy_from(key_material, start, 0, DES_KEY_BITS)?;
    to_des_key(&key)
}

fn widen_key(key_material: &BitArray, start: usize) -> Result<DesKey> {
    let mut key = BitArray::create(DES_KEY_BITS);
    for byte in 0..des::KEY_SIZE {
        key.copy_from(key_material, start + 7 * byte, 8 * byte, 7)?;
    }

    let mut bytes = to_des_key(&key)?;
    for byte in bytes.iter_mut() {
        if byte.count_ones() % 2 == 0 {
            *byte |= 1;
        }
    }
    Ok(bytes)
}

fn to_des_key(key: &BitArray) -> Result<DesKey> {
    key.to_bytes()
        .try_into()
        .map_err(|_| TripleDesError::InvalidKeyLength { bits: key.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const K1: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
    const K2: [u8; 8] = [0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01];
    const K3: [u8; 8] = [0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01, 0x23];

    #[test]
    fn test_three_key_split() {
        let material = [K1, K2, K3].concat();
        let schedule = KeySchedule::from_bytes(&material).unwrap();

        assert!(!schedule.is_two_key());
        assert_eq!(schedule.k1(), &K1);
        assert_eq!(schedule.k2(), &K2);
        assert_eq!(schedule.k3(), &K3);
    }

    #[test]
    fn test_two_key_reuses_k1() {
        let material = [K1, K2].concat();
        let schedule = KeySchedule::from_bytes(&material).unwrap();

        assert!(schedule.is_two_key());
        assert_eq!(schedule.k1(), &K1);
        assert_eq!(schedule.k2(), &K2);
        assert_eq!(schedule.k3(), &K1);
    }

    #[test]
    fn test_packed_keys_are_widened_with_odd_parity() {
        // Every byte of K1/K2/K3 already has odd parity, so stripping the
        // parity bits and widening again must give the same keys back.
        let full = BitArray::from_bytes(&[K1, K2, K3].concat());
        let mut packed = BitArray::create(168);
        for byte in 0..24 {
            packed.copy_from(&full, 8 * byte, 7 * byte, 7).unwrap();
        }

        let schedule = KeySchedule::from_bits(&packed).unwrap();
        assert_eq!(schedule, KeySchedule::ThreeKey { k1: K1, k2: K2, k3: K3 });
    }

    #[test]
    fn test_packed_two_key() {
        let mut packed = BitArray::create(112);
        packed.copy_from(&BitArray::from_bytes(&[0xff; 14]), 0, 0, 112).unwrap();

        let schedule = KeySchedule::from_bits(&packed).unwrap();
        // seven ones plus a zero parity bit
        assert_eq!(schedule.k1(), &[0xfe; 8]);
        assert_eq!(schedule.k3(), &[0xfe; 8]);
        assert!(schedule.is_two_key());
    }

    #[test]
    fn test_rejects_other_lengths() {
        for bits in [0, 64, 111, 113, 127, 129, 167, 169, 191, 193, 256] {
            assert_eq!(
                KeySchedule::from_bits(&BitArray::create(bits)),
                Err(TripleDesError::InvalidKeyLength { bits })
            );
        }
    }

    #[test]
    fn test_debug_hides_key_bytes() {
        let schedule = KeySchedule::from_bytes(&[K1, K2].concat()).unwrap();
        let text = format!("{:?}", schedule);
        assert_eq!(text, "TwoKey { .. }");
    }
}
