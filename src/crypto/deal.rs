use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::des::Des;
use crate::crypto::error::{CryptoError, Result};
use crate::crypto::key::Key;
use crate::crypto::utils::{is_valid_deal_key, xor_into};

const BLOCK_SIZE: usize = 16;
const NUM_ROUNDS: usize = 6;

/// DEAL: a six-round Feistel network on 128-bit blocks whose round function
/// is DES encryption under a per-round subkey. Key sizes 16, 24 or 32 bytes
/// (DEAL-128/-192/-256).
///
/// The subkey schedule past the initial key chunks is specific to this
/// codebase, not the published DEAL proposal; ports must keep it byte-exact.
#[derive(Debug)]
pub struct Deal {
    key_size: usize,
    round_ciphers: Vec<Des>,
}

impl Deal {
    pub fn new(key_size: usize) -> Result<Self> {
        if !matches!(key_size, 16 | 24 | 32) {
            return Err(CryptoError::InvalidKey(format!(
                "DEAL key size must be 16, 24 or 32 bytes, got {key_size}"
            )));
        }
        Ok(Deal {
            key_size,
            round_ciphers: Vec::new(),
        })
    }

    /// Subkeys for rounds whose chunk lies inside the first half of the key
    /// are copied verbatim. Every round from `half/8` on re-reads 8
    /// contiguous bytes at offset `(i*8) mod half` (the read may run past
    /// the half-key boundary) and salts each byte with `i*0x11 + j*0x17`;
    /// for 24-byte keys this overwrites the round-1 copy.
    fn generate_subkeys(key: &[u8]) -> [[u8; 8]; NUM_ROUNDS] {
        let half = key.len() / 2;

        let mut subkeys = [[0u8; 8]; NUM_ROUNDS];
        for (i, subkey) in subkeys.iter_mut().enumerate() {
            if i * 8 >= half {
                break;
            }
            subkey.copy_from_slice(&key[i * 8..i * 8 + 8]);
        }

        for i in half / 8..NUM_ROUNDS {
            let offset = (i * 8) % half;
            subkeys[i].copy_from_slice(&key[offset..offset + 8]);
            for (j, byte) in subkeys[i].iter_mut().enumerate() {
                *byte ^= (i * 0x11 + j * 0x17) as u8;
            }
        }
        subkeys
    }

    fn feistel(&self, block: &[u8], output: &mut [u8], decrypt: bool) -> Result<()> {
        if self.round_ciphers.is_empty() {
            return Err(CryptoError::CipherNotKeyed);
        }

        let mut left = [0u8; 8];
        let mut right = [0u8; 8];
        left.copy_from_slice(&block[..8]);
        right.copy_from_slice(&block[8..]);

        let mut round_out = [0u8; 8];
        if decrypt {
            // Inverse loop: (L, R) := (R xor DES_enc_i(L), L). The round
            // function stays the forward DES; only the network is inverted.
            for cipher in self.round_ciphers.iter().rev() {
                cipher.encrypt_block(&left, &mut round_out)?;
                xor_into(&mut right, &round_out);
                std::mem::swap(&mut left, &mut right);
            }
        } else {
            // (L, R) := (R, L xor DES_enc_i(R)), no final swap.
            for cipher in &self.round_ciphers {
                cipher.encrypt_block(&right, &mut round_out)?;
                xor_into(&mut left, &round_out);
                std::mem::swap(&mut left, &mut right);
            }
        }

        output[..8].copy_from_slice(&left);
        output[8..].copy_from_slice(&right);
        Ok(())
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
}

impl BlockCipher for Deal {
    fn name(&self) -> String {
        format!("DEAL-{}", self.key_size * 8)
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn key_size(&self) -> usize {
        self.key_size
    }

    fn set_key(&mut self, key: &Key) -> Result<()> {
        if key.len() != self.key_size {
            return Err(CryptoError::InvalidKey(format!(
                "DEAL-{} key must be {} bytes, got {}",
                self.key_size * 8,
                self.key_size,
                key.len()
            )));
        }

        let subkeys = Self::generate_subkeys(key.as_bytes());
        let mut ciphers = Vec::with_capacity(NUM_ROUNDS);
        for subkey in &subkeys {
            let mut des = Des::new();
            des.set_key(&Key::from(&subkey[..]))?;
            ciphers.push(des);
        }
        self.round_ciphers = ciphers;
        Ok(())
    }

    fn is_valid_key(&self, key: &Key) -> bool {
        is_valid_deal_key(key)
    }

    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.check_block(input, output)?;
        self.feistel(input, output, false)
    }

    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.check_block(input, output)?;
        self.feistel(input, output, true)
    }
}
