use crate::crypto::error::Result;
use crate::crypto::modes::{
    ensure_block_multiple, ensure_iv_length, ensure_same_length, pad_for_encrypt, random_iv,
    unpad_after_decrypt, BlockCipherMode, CipherMode, OwnedPadding, SharedCipher,
};
use crate::crypto::utils::{xor, xor_into};

/// Cipher block chaining: each plaintext block is XORed with the previous
/// ciphertext block (the IV for the first) before encryption.
pub struct CbcMode {
    cipher: SharedCipher,
    padding: Option<OwnedPadding>,
    iv: Vec<u8>,
    prev: Vec<u8>,
}

impl CbcMode {
    pub fn new(cipher: SharedCipher, padding: Option<OwnedPadding>) -> Self {
        let iv = random_iv(cipher.block_size());
        let prev = iv.clone();
        CbcMode {
            cipher,
            padding,
            iv,
            prev,
        }
    }
}

impl BlockCipherMode for CbcMode {
    fn mode(&self) -> CipherMode {
        CipherMode::Cbc
    }

    fn name(&self) -> String {
        "CBC".to_string()
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
        let padded = pad_for_encrypt(&self.padding, plaintext, block_size, "CBC")?;
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
        let block_size = self.cipher.block_size();
        ensure_block_multiple(input.len(), block_size, "CBC")?;

        for (in_block, out_block) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            let mixed = xor(in_block, &self.prev);
            self.cipher.encrypt_block(&mixed, out_block)?;
            self.prev.copy_from_slice(out_block);
        }
        Ok(())
    }

    fn decrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        ensure_same_length(input, output)?;
        let block_size = self.cipher.block_size();
        ensure_block_multiple(input.len(), block_size, "CBC")?;

        for (in_block, out_block) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            self.cipher.decrypt_block(in_block, out_block)?;
            xor_into(out_block, &self.prev);
            self.prev.copy_from_slice(in_block);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.prev = self.iv.clone();
    }
}
