//! Byte-order helpers, XOR primitives and the DES/Triple-DES/DEAL key
//! validators.

use crate::crypto::des_tables::{PARITY_MASK, SEMI_WEAK_KEY_PAIRS, WEAK_KEYS};
use crate::crypto::key::Key;

pub fn read_u16_be(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

pub fn read_u32_be(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

pub fn read_u64_be(bytes: &[u8], offset: usize) -> u64 {
    u64::from_be_bytes(bytes[offset..offset + 8].try_into().unwrap())
}

pub fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

pub fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

pub fn read_u64_le(bytes: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap())
}

pub fn write_u16_be(value: u16, bytes: &mut [u8], offset: usize) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

pub fn write_u32_be(value: u32, bytes: &mut [u8], offset: usize) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

pub fn write_u64_be(value: u64, bytes: &mut [u8], offset: usize) {
    bytes[offset..offset + 8].copy_from_slice(&value.to_be_bytes());
}

pub fn write_u16_le(value: u16, bytes: &mut [u8], offset: usize) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn write_u32_le(value: u32, bytes: &mut [u8], offset: usize) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn write_u64_le(value: u64, bytes: &mut [u8], offset: usize) {
    bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

/// Pairwise XOR over the shorter of the two slices.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

/// XORs `source` into `target` in place, over the shorter length. The borrow
/// checker rules out the exact-alias case; a caller holding two views of the
/// same buffer must copy first.
pub fn xor_into(target: &mut [u8], source: &[u8]) {
    for (t, s) in target.iter_mut().zip(source.iter()) {
        *t ^= s;
    }
}

/// True when every byte of the key has odd parity (the DES convention for the
/// eighth bit of each byte).
pub fn has_odd_parity(key: &Key) -> bool {
    key.as_bytes().iter().all(|b| b.count_ones() % 2 == 1)
}

/// Checks the four published weak keys, ignoring parity bits.
pub fn is_weak_des_key(key: &Key) -> bool {
    if key.len() != 8 {
        return false;
    }
    let masked = read_u64_be(key.as_bytes(), 0) & PARITY_MASK;
    WEAK_KEYS.iter().any(|&w| w & PARITY_MASK == masked)
}

/// Checks the six published semi-weak pairs, ignoring parity bits.
pub fn is_semi_weak_des_key(key: &Key) -> bool {
    if key.len() != 8 {
        return false;
    }
    let masked = read_u64_be(key.as_bytes(), 0) & PARITY_MASK;
    SEMI_WEAK_KEY_PAIRS
        .iter()
        .any(|&(a, b)| a & PARITY_MASK == masked || b & PARITY_MASK == masked)
}

/// Strong-key check offered alongside DES. `DES::set_key` itself only
/// enforces the length; callers that care run this first.
pub fn is_strong_des_key(key: &Key) -> bool {
    key.len() == 8
        && has_odd_parity(key)
        && !is_weak_des_key(key)
        && !is_semi_weak_des_key(key)
}

fn all_bytes_equal(bytes: &[u8]) -> bool {
    bytes.windows(2).all(|w| w[0] == w[1])
}

/// Two- or three-key material that is not a single repeated byte.
pub fn is_valid_triple_des_key(key: &Key) -> bool {
    (key.len() == 16 || key.len() == 24) && !all_bytes_equal(key.as_bytes())
}

/// 128/192/256-bit material that is not a single repeated byte.
pub fn is_valid_deal_key(key: &Key) -> bool {
    matches!(key.len(), 16 | 24 | 32) && !all_bytes_equal(key.as_bytes())
}
