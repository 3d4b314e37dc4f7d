use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::des_tables::{E, FP, IP, P, PC1, PC2, SHIFTS, S_BOXES};
use crate::crypto::error::{CryptoError, Result};
use crate::crypto::key::Key;

const BLOCK_SIZE: usize = 8;
const KEY_SIZE: usize = 8;
const NUM_ROUNDS: usize = 16;

/// FIPS 46-3 DES. 64-bit block, 64-bit key of which 56 bits are effective.
#[derive(Debug)]
pub struct Des {
    round_keys: Option<[u64; NUM_ROUNDS]>,
}

/// Moves `input` bits into table order. Table entries are 1-based positions
/// counted from the MSB of an `input_bits`-wide word.
fn permute(table: &[u8], input: u64, input_bits: u32) -> u64 {
    let mut output = 0u64;
    for &pos in table {
        output = (output << 1) | ((input >> (input_bits - pos as u32)) & 1);
    }
    output
}

/// E-expansion, subkey mix, S-box substitution, P-permutation.
fn feistel(right: u32, subkey: u64) -> u32 {
    let expanded = permute(&E, right as u64, 32);
    let mixed = expanded ^ subkey;

    let mut substituted = 0u32;
    for (box_index, s_box) in S_BOXES.iter().enumerate() {
        let group = ((mixed >> (42 - 6 * box_index)) & 0x3F) as usize;
        let row = ((group & 0x20) >> 4) | (group & 1);
        let col = (group >> 1) & 0xF;
        substituted = (substituted << 4) | s_box[row * 16 + col] as u32;
    }

    permute(&P, substituted as u64, 32) as u32
}

impl Des {
    pub fn new() -> Self {
        Des { round_keys: None }
    }

    /// PC-1, sixteen C/D rotations, PC-2.
    fn generate_round_keys(key: u64) -> [u64; NUM_ROUNDS] {
        // 1) PC-1: отбрасываем биты чётности, остаётся 56 бит
        let permuted = permute(&PC1, key, 64);
        // 2) делим на C и D по 28 бит
        let mut c = ((permuted >> 28) & 0x0FFF_FFFF) as u32;
        let mut d = (permuted & 0x0FFF_FFFF) as u32;

        // 3) для каждого раунда: циклический сдвиг, затем PC-2
        let mut round_keys = [0u64; NUM_ROUNDS];
        for (round, &shift) in SHIFTS.iter().enumerate() {
            c = ((c << shift) | (c >> (28 - shift))) & 0x0FFF_FFFF;
            d = ((d << shift) | (d >> (28 - shift))) & 0x0FFF_FFFF;
            let cd = ((c as u64) << 28) | d as u64;
            round_keys[round] = permute(&PC2, cd, 56);
        }
        round_keys
    }

    fn process_block(&self, block: u64, decrypt: bool) -> Result<u64> {
        let round_keys = self.round_keys.ok_or(CryptoError::CipherNotKeyed)?;

        let permuted = permute(&IP, block, 64);
        let mut left = (permuted >> 32) as u32;
        let mut right = permuted as u32;

        for round in 0..NUM_ROUNDS {
            let subkey = if decrypt {
                round_keys[NUM_ROUNDS - 1 - round]
            } else {
                round_keys[round]
            };
            let next = left ^ feistel(right, subkey);
            left = right;
            right = next;
        }

        // Pre-output swap undoes the last rounds half-exchange.
        let preoutput = ((right as u64) << 32) | left as u64;
        Ok(permute(&FP, preoutput, 64))
    }

    fn check_block(&self, input: &[u8], output: &[u8]) -> Result<()> {
        if input.len() != BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize {
                expected: BLOCK_SIZE,
                actual: input.len(),
            });
        }
        if output.len() != BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize {
                expected: BLOCK_SIZE,
                actual: output.len(),
            });
        }
        Ok(())
    }

    /// The installed schedule, if any. Exposed for tests and composers.
    pub fn round_keys(&self) -> Option<&[u64; NUM_ROUNDS]> {
        self.round_keys.as_ref()
    }
}

impl Default for Des {
    fn default() -> Self {
        Des::new()
    }
}

impl BlockCipher for Des {
    fn name(&self) -> String {
        "DES".to_string()
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn key_size(&self) -> usize {
        KEY_SIZE
    }

    fn set_key(&mut self, key: &Key) -> Result<()> {
        if key.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKey(format!(
                "DES key must be {} bytes, got {}",
                KEY_SIZE,
                key.len()
            )));
        }
        let packed = u64::from_be_bytes(key.as_bytes().try_into().unwrap());
        self.round_keys = Some(Self::generate_round_keys(packed));
        Ok(())
    }

    fn is_valid_key(&self, key: &Key) -> bool {
        key.len() == KEY_SIZE
    }

    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.check_block(input, output)?;
        let block = u64::from_be_bytes(input.try_into().unwrap());
        let encrypted = self.process_block(block, false)?;
        output.copy_from_slice(&encrypted.to_be_bytes());
        Ok(())
    }

    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.check_block(input, output)?;
        let block = u64::from_be_bytes(input.try_into().unwrap());
        let decrypted = self.process_block(block, true)?;
        output.copy_from_slice(&decrypted.to_be_bytes());
        Ok(())
    }
}
