use crate::crypto::error::Result;
use crate::crypto::modes::{
    encrypt_block_vec, ensure_iv_length, ensure_same_length, random_iv, BlockCipherMode,
    CipherMode, OwnedPadding, SharedCipher,
};

/// Output feedback: the keystream is the cipher iterated on the IV
/// (`S_1 = E(IV)`, `S_i = E(S_{i-1})`), XORed into the data in both
/// directions. Keystream bytes are consumed in order at byte granularity, so
/// callers may stream with arbitrary chunk sizes.
pub struct OfbMode {
    cipher: SharedCipher,
    padding: Option<OwnedPadding>,
    iv: Vec<u8>,
    /// Most recent keystream block, doubling as the feedback state.
    keystream: Vec<u8>,
    /// Consumed bytes of `keystream`; block-size forces a refill.
    position: usize,
}

impl OfbMode {
    pub fn new(cipher: SharedCipher, padding: Option<OwnedPadding>) -> Self {
        let iv = random_iv(cipher.block_size());
        let keystream = iv.clone();
        let position = keystream.len();
        OfbMode {
            cipher,
            padding,
            iv,
            keystream,
            position,
        }
    }

    fn next_keystream_byte(&mut self) -> Result<u8> {
        if self.position == self.keystream.len() {
            self.keystream = encrypt_block_vec(&*self.cipher, &self.keystream)?;
            self.position = 0;
        }
        let byte = self.keystream[self.position];
        self.position += 1;
        Ok(byte)
    }

    fn process_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        ensure_same_length(input, output)?;
        for (out_byte, in_byte) in output.iter_mut().zip(input.iter()) {
            *out_byte = in_byte ^ self.next_keystream_byte()?;
        }
        Ok(())
    }
}

impl BlockCipherMode for OfbMode {
    fn mode(&self) -> CipherMode {
        CipherMode::Ofb
    }

    fn name(&self) -> String {
        "OFB".to_string()
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

    fn generate_random_iv(&mut self) {
        self.iv = random_iv(self.cipher.block_size());
        self.reset();
    }

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let mut output = vec![0u8; plaintext.len()];
        self.process_raw(plaintext, &mut output)?;
        Ok(output)
    }

    fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let mut output = vec![0u8; ciphertext.len()];
        self.process_raw(ciphertext, &mut output)?;
        Ok(output)
    }

    fn encrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output)
    }

    fn decrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process_raw(input, output)
    }

    fn reset(&mut self) {
        self.keystream = self.iv.clone();
        self.position = self.keystream.len();
    }
}
