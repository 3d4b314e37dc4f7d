use rayon::prelude::*;

use crate::crypto::error::Result;
use crate::crypto::modes::{
    ensure_block_multiple, ensure_same_length, pad_for_encrypt, unpad_after_decrypt,
    BlockCipherMode, CipherMode, OwnedPadding, SharedCipher, PARALLEL_THRESHOLD,
};

/// Electronic codebook: every block is enciphered independently. No IV, no
/// chaining, identical plaintext blocks leak as identical ciphertext blocks.
pub struct EcbMode {
    cipher: SharedCipher,
    padding: Option<OwnedPadding>,
}

impl EcbMode {
    pub fn new(cipher: SharedCipher, padding: Option<OwnedPadding>) -> Self {
        EcbMode { cipher, padding }
    }

    fn process_raw(&self, input: &[u8], output: &mut [u8], decrypt: bool) -> Result<()> {
        ensure_same_length(input, output)?;
        let block_size = self.cipher.block_size();
        ensure_block_multiple(input.len(), block_size, "ECB")?;

        if input.len() >= PARALLEL_THRESHOLD {
            output
                .par_chunks_mut(block_size)
                .zip(input.par_chunks(block_size))
                .try_for_each(|(out_block, in_block)| {
                    if decrypt {
                        self.cipher.decrypt_block(in_block, out_block)
                    } else {
                        self.cipher.encrypt_block(in_block, out_block)
                    }
                })
        } else {
            for (out_block, in_block) in
                output.chunks_mut(block_size).zip(input.chunks(block_size))
            {
                if decrypt {
                    self.cipher.decrypt_block(in_block, out_block)?;
                } else {
                    self.cipher.encrypt_block(in_block, out_block)?;
                }
            }
            Ok(())
        }
    }
}

impl BlockCipherMode for EcbMode {
    fn mode(&self) -> CipherMode {
        CipherMode::Ecb
    }

    fn name(&self) -> String {
        "ECB".to_string()
    }

    fn set_cipher(&mut self, cipher: SharedCipher) {
        self.cipher = cipher;
    }

    fn set_padding(&mut self, padding: Option<OwnedPadding>) {
        self.padding = padding;
    }

    fn uses_padding(&self) -> bool {
        self.padding.is_some()
    }

    fn set_iv(&mut self, _iv: &[u8]) -> Result<()> {
        Ok(())
    }

    fn iv(&self) -> Vec<u8> {
        Vec::new()
    }

    fn generate_random_iv(&mut self) {}

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let block_size = self.cipher.block_size();
        let padded = pad_for_encrypt(&self.padding, plaintext, block_size, "ECB")?;
        let mut output = vec![0u8; padded.len()];
        self.process_raw(&padded, &mut output, false)?;
        Ok(output)
    }

    fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; ciphertext.len()];
        self.process_raw(ciphertext, &mut output, true)?;
        unpad_after_decrypt(&self.padding, output)
    }

    fn encrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output, false)
    }

    fn decrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output, true)
    }

    fn reset(&mut self) {}
}
