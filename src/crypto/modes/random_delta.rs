use crate::crypto::error::Result;
use crate::crypto::modes::{
    decrypt_block_vec, encrypt_block_vec, ensure_block_multiple, ensure_iv_length,
    ensure_same_length, pad_for_encrypt, random_iv, unpad_after_decrypt, BlockCipherMode,
    CipherMode, OwnedPadding, SharedCipher,
};
use crate::crypto::utils::xor;

/// CBC variant that folds a per-block pseudo-random delta into both the
/// pre-encryption XOR and the chaining update. The delta generator is a
/// plain LCG seeded from the IV and the block index; it only diversifies
/// ciphertext and carries no cryptographic weight. Bespoke to this codebase;
/// reproduce byte-for-byte or not at all.
pub struct RandomDeltaMode {
    cipher: SharedCipher,
    padding: Option<OwnedPadding>,
    iv: Vec<u8>,
    /// Delta-stripped previous ciphertext block; the IV before any block.
    prev: Vec<u8>,
    block_index: u64,
}

impl RandomDeltaMode {
    pub fn new(cipher: SharedCipher, padding: Option<OwnedPadding>) -> Self {
        let iv = random_iv(cipher.block_size());
        let prev = iv.clone();
        RandomDeltaMode {
            cipher,
            padding,
            iv,
            prev,
            block_index: 0,
        }
    }

    /// Byte `j` of the delta for block `index`: one LCG step over the seed
    /// `IV[j mod |IV|] + index*256 + j`, low byte kept.
    fn delta(&self, index: u64) -> Vec<u8> {
        (0..self.iv.len())
            .map(|j| {
                let seed = self.iv[j % self.iv.len()] as u64 + index * 256 + j as u64;
                let advanced = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345) & 0x7FFF_FFFF;
                advanced as u8
            })
            .collect()
    }

    fn encrypt_blocks(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let block_size = self.cipher.block_size();
        for (in_block, out_block) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            let delta = self.delta(self.block_index);
            // masked IV = prev ^ delta; ciphertext gets the delta back on top.
            let mut mixed = xor(in_block, &self.prev);
            for (byte, d) in mixed.iter_mut().zip(delta.iter()) {
                *byte ^= d;
            }
            let encrypted = encrypt_block_vec(&*self.cipher, &mixed)?;
            for ((out_byte, enc_byte), d) in
                out_block.iter_mut().zip(encrypted.iter()).zip(delta.iter())
            {
                *out_byte = enc_byte ^ d;
            }
            self.prev = encrypted;
            self.block_index += 1;
        }
        Ok(())
    }

    fn decrypt_blocks(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let block_size = self.cipher.block_size();
        for (in_block, out_block) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            let delta = self.delta(self.block_index);
            let stripped = xor(in_block, &delta);
            let decrypted = decrypt_block_vec(&*self.cipher, &stripped)?;
            for ((out_byte, dec_byte), (p, d)) in out_block
                .iter_mut()
                .zip(decrypted.iter())
                .zip(self.prev.iter().zip(delta.iter()))
            {
                *out_byte = dec_byte ^ p ^ d;
            }
            self.prev = stripped;
            self.block_index += 1;
        }
        Ok(())
    }
}

impl BlockCipherMode for RandomDeltaMode {
    fn mode(&self) -> CipherMode {
        CipherMode::RandomDelta
    }

    fn name(&self) -> String {
        "RandomDelta".to_string()
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

    fn uses_padding(&self) -> bool {
        self.padding.is_some()
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

    fn generate_random_iv(&mut self) {
        self.iv = random_iv(self.cipher.block_size());
        self.reset();
    }

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let block_size = self.cipher.block_size();
        let padded = pad_for_encrypt(&self.padding, plaintext, block_size, "RandomDelta")?;
        let mut output = vec![0u8; padded.len()];
        self.encrypt_raw(&padded, &mut output)?;
        Ok(output)
    }

    fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let mut output = vec![0u8; ciphertext.len()];
        self.decrypt_raw(ciphertext, &mut output)?;
        unpad_after_decrypt(&self.padding, output)
    }

    fn encrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        ensure_same_length(input, output)?;
        ensure_block_multiple(input.len(), self.cipher.block_size(), "RandomDelta")?;
        self.encrypt_blocks(input, output)
    }

    fn decrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        ensure_same_length(input, output)?;
        ensure_block_multiple(input.len(), self.cipher.block_size(), "RandomDelta")?;
        self.decrypt_blocks(input, output)
    }

    fn reset(&mut self) {
        self.prev = self.iv.clone();
        self.block_index = 0;
    }
}
