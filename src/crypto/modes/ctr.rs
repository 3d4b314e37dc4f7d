use rand::RngCore;
use rayon::prelude::*;

use crate::crypto::error::Result;
use crate::crypto::modes::{
    encrypt_block_vec, ensure_iv_length, ensure_same_length, BlockCipherMode, CipherMode,
    OwnedPadding, SharedCipher, PARALLEL_THRESHOLD,
};

/// Counter mode. The IV doubles as a nonce-and-counter composite: the high
/// half of the block is the nonce, the low half the counter seed. The 64-bit
/// block counter is OR-serialized big-endian into the low half, which
/// coincides with addition because `generate_random_iv` leaves the low half
/// zero; a counter outgrowing the low half carries into the nonce bytes.
/// Callers installing their own IV should keep the low half clear.
pub struct CtrMode {
    cipher: SharedCipher,
    padding: Option<OwnedPadding>,
    iv: Vec<u8>,
    counter: u64,
    keystream: Vec<u8>,
    position: usize,
}

impl CtrMode {
    pub fn new(cipher: SharedCipher, padding: Option<OwnedPadding>) -> Self {
        let block_size = cipher.block_size();
        let mut mode = CtrMode {
            cipher,
            padding,
            iv: vec![0u8; block_size],
            counter: 0,
            keystream: Vec::new(),
            position: 0,
        };
        mode.generate_random_iv();
        mode
    }

    /// The block fed to the cipher for counter value `value`.
    fn counter_block(&self, value: u64) -> Vec<u8> {
        let block_size = self.iv.len();
        let half = block_size / 2;
        let mut block = self.iv.clone();

        let mut remaining = value;
        for index in (half..block_size).rev() {
            block[index] |= (remaining & 0xFF) as u8;
            remaining >>= 8;
        }

        // Counter wider than the low half: carry into the nonce bytes.
        let mut carry = 0u64;
        let mut index = half;
        while (remaining != 0 || carry != 0) && index > 0 {
            index -= 1;
            let sum = block[index] as u64 + (remaining & 0xFF) + carry;
            block[index] = sum as u8;
            carry = sum >> 8;
            remaining >>= 8;
        }

        block
    }

    fn process_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        ensure_same_length(input, output)?;

        for (out_byte, in_byte) in output.iter_mut().zip(input.iter()) {
            if self.position >= self.keystream.len() {
                let block = self.counter_block(self.counter);
                self.keystream = encrypt_block_vec(&*self.cipher, &block)?;
                self.counter += 1;
                self.position = 0;
            }
            *out_byte = in_byte ^ self.keystream[self.position];
            self.position += 1;
        }
        Ok(())
    }

    /// Whole-message path: counter blocks are independent, so large inputs
    /// fan out over rayon.
    fn process_parallel(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        ensure_same_length(input, output)?;
        let block_size = self.cipher.block_size();

        output
            .par_chunks_mut(block_size)
            .zip(input.par_chunks(block_size))
            .enumerate()
            .try_for_each(|(index, (out_block, in_block))| {
                let block = self.counter_block(index as u64);
                let keystream = encrypt_block_vec(&*self.cipher, &block)?;
                for (out_byte, (in_byte, key_byte)) in out_block
                    .iter_mut()
                    .zip(in_block.iter().zip(keystream.iter()))
                {
                    *out_byte = in_byte ^ key_byte;
                }
                Ok(())
            })?;

        // Leave the streaming state where a sequential pass would have.
        let full_blocks = (input.len() / block_size) as u64;
        let remainder = input.len() % block_size;
        if remainder == 0 {
            self.counter = full_blocks;
            self.keystream = Vec::new();
            self.position = 0;
        } else {
            let block = self.counter_block(full_blocks);
            self.keystream = encrypt_block_vec(&*self.cipher, &block)?;
            self.counter = full_blocks + 1;
            self.position = remainder;
        }
        Ok(())
    }

    fn process_message(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let mut output = vec![0u8; data.len()];
        if data.len() >= PARALLEL_THRESHOLD {
            self.process_parallel(data, &mut output)?;
        } else {
            self.process_raw(data, &mut output)?;
        }
        Ok(output)
    }
}

impl BlockCipherMode for CtrMode {
    fn mode(&self) -> CipherMode {
        CipherMode::Ctr
    }

    fn name(&self) -> String {
        "CTR".to_string()
    }

    fn set_cipher(&mut self, cipher: SharedCipher) {
        self.cipher = cipher;
        if self.iv.len() != self.cipher.block_size() {
            self.generate_random_iv();
        }
        self.reset();
    }

    fn set_padding(&mut self, padding: Option<OwnedPadding>) {
        self.padding = padding;
    }

    /// Stream-like: an attached padding is never applied.
    fn uses_padding(&self) -> bool {
        false
    }

    fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        ensure_iv_length(iv, self.cipher.block_size())?;
        self.iv = iv.to_vec();
        self.reset();
        Ok(())
    }

    fn iv(&self) -> Vec<u8> {
        self.iv.clone()
    }

    /// Random nonce in the high half, zeroed counter seed in the low half.
    fn generate_random_iv(&mut self) {
        let block_size = self.cipher.block_size();
        let half = block_size / 2;
        let mut iv = vec![0u8; block_size];
        rand::rng().fill_bytes(&mut iv[..half]);
        self.iv = iv;
        self.reset();
    }

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.process_message(plaintext)
    }

    fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.process_message(ciphertext)
    }

    fn encrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output)
    }

    fn decrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output)
    }

    fn reset(&mut self) {
        self.counter = 0;
        self.keystream = Vec::new();
        self.position = 0;
    }
}
