use crate::crypto::error::{CryptoError, Result};
use crate::crypto::modes::{
    encrypt_block_vec, ensure_iv_length, ensure_same_length, random_iv, BlockCipherMode,
    CipherMode, OwnedPadding, SharedCipher,
};

/// Cipher feedback with a byte-granular segment size (default: one full
/// block). The feedback register starts as the IV and is refilled with
/// ciphertext, so both directions run the cipher forward only.
///
/// Any input length is accepted; the final partial segment just truncates
/// the keystream and leaves the register untouched.
pub struct CfbMode {
    cipher: SharedCipher,
    padding: Option<OwnedPadding>,
    iv: Vec<u8>,
    register: Vec<u8>,
    segment_size: usize,
}

impl CfbMode {
    pub fn new(cipher: SharedCipher, padding: Option<OwnedPadding>) -> Self {
        let segment_size = cipher.block_size();
        let iv = random_iv(cipher.block_size());
        let register = iv.clone();
        CfbMode {
            cipher,
            padding,
            iv,
            register,
            segment_size,
        }
    }

    /// CFB-s with `segment_size` bytes emitted per cipher call,
    /// `1 <= segment_size <= block_size`.
    pub fn with_segment_size(
        cipher: SharedCipher,
        padding: Option<OwnedPadding>,
        segment_size: usize,
    ) -> Result<Self> {
        let block_size = cipher.block_size();
        if segment_size == 0 || segment_size > block_size {
            return Err(CryptoError::InvalidInput(format!(
                "CFB segment size must be between 1 and {block_size} bytes, got {segment_size}"
            )));
        }
        let mut mode = CfbMode::new(cipher, padding);
        mode.segment_size = segment_size;
        Ok(mode)
    }

    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    /// Drops the oldest `fed.len()` register bytes and appends the ciphertext
    /// segment as the new low end.
    fn feed_register(&mut self, fed: &[u8]) {
        self.register.drain(..fed.len());
        self.register.extend_from_slice(fed);
    }

    fn process_raw(&mut self, input: &[u8], output: &mut [u8], decrypt: bool) -> Result<()> {
        ensure_same_length(input, output)?;

        let segment = self.segment_size;
        for (in_seg, out_seg) in input.chunks(segment).zip(output.chunks_mut(segment)) {
            let keystream = encrypt_block_vec(&*self.cipher, &self.register)?;
            for (out_byte, (in_byte, key_byte)) in
                out_seg.iter_mut().zip(in_seg.iter().zip(keystream.iter()))
            {
                *out_byte = in_byte ^ key_byte;
            }

            if in_seg.len() == segment {
                if decrypt {
                    self.feed_register(in_seg);
                } else {
                    self.feed_register(out_seg);
                }
            }
        }
        Ok(())
    }
}

impl BlockCipherMode for CfbMode {
    fn mode(&self) -> CipherMode {
        CipherMode::Cfb
    }

    fn name(&self) -> String {
        format!("CFB-{}", self.segment_size * 8)
    }

    fn set_cipher(&mut self, cipher: SharedCipher) {
        self.cipher = cipher;
        let block_size = self.cipher.block_size();
        self.segment_size = self.segment_size.min(block_size);
        if self.iv.len() != block_size {
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

    fn generate_random_iv(&mut self) {
        self.iv = random_iv(self.cipher.block_size());
        self.reset();
    }

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let mut output = vec![0u8; plaintext.len()];
        self.encrypt_raw(plaintext, &mut output)?;
        Ok(output)
    }

    fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let mut output = vec![0u8; ciphertext.len()];
        self.decrypt_raw(ciphertext, &mut output)?;
        Ok(output)
    }

    fn encrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output, false)
    }

    fn decrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output, true)
    }

    fn reset(&mut self) {
        self.register = self.iv.clone();
    }
}
