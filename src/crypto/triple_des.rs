use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::des::Des;
use crate::crypto::error::{CryptoError, Result};
use crate::crypto::key::Key;
use crate::crypto::utils::is_valid_triple_des_key;

const BLOCK_SIZE: usize = 8;

/// Keying order of the three DES passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleDesVariant {
    /// Encrypt-decrypt-encrypt, the interoperable default.
    Ede,
    /// Encrypt-encrypt-encrypt.
    Eee,
}

/// Three chained DES instances. A 16-byte key selects two-key operation
/// (k3 := k1, classical EDE2, weaker than the three-key form); a 24-byte key
/// keys all three passes independently.
pub struct TripleDes {
    variant: TripleDesVariant,
    des1: Des,
    des2: Des,
    des3: Des,
    two_key: bool,
    keyed: bool,
}

impl TripleDes {
    pub fn new(variant: TripleDesVariant) -> Self {
        TripleDes {
            variant,
            des1: Des::new(),
            des2: Des::new(),
            des3: Des::new(),
            two_key: false,
            keyed: false,
        }
    }

    pub fn variant(&self) -> TripleDesVariant {
        self.variant
    }

    fn pass(des: &Des, decrypt: bool, input: &[u8], output: &mut [u8]) -> Result<()> {
        if decrypt {
            des.decrypt_block(input, output)
        } else {
            des.encrypt_block(input, output)
        }
    }

    /// Runs the three passes in order. `directions[i]` selects decryption for
    /// the i-th pass.
    fn cascade(
        &self,
        order: [&Des; 3],
        directions: [bool; 3],
        input: &[u8],
        output: &mut [u8],
    ) -> Result<()> {
        if !self.keyed {
            return Err(CryptoError::CipherNotKeyed);
        }
        let mut buffer = [0u8; BLOCK_SIZE];
        Self::pass(order[0], directions[0], input, &mut buffer)?;
        let mut second = [0u8; BLOCK_SIZE];
        Self::pass(order[1], directions[1], &buffer, &mut second)?;
        Self::pass(order[2], directions[2], &second, output)
    }
}

impl BlockCipher for TripleDes {
    fn name(&self) -> String {
        match self.variant {
            TripleDesVariant::Ede => "TripleDES-EDE".to_string(),
            TripleDesVariant::Eee => "TripleDES-EEE".to_string(),
        }
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn key_size(&self) -> usize {
        if self.two_key {
            16
        } else {
            24
        }
    }

    fn set_key(&mut self, key: &Key) -> Result<()> {
        let bytes = key.as_bytes();
        match bytes.len() {
            16 => {
                self.des1.set_key(&Key::from(&bytes[0..8]))?;
                self.des2.set_key(&Key::from(&bytes[8..16]))?;
                self.des3.set_key(&Key::from(&bytes[0..8]))?;
                self.two_key = true;
            }
            24 => {
                self.des1.set_key(&Key::from(&bytes[0..8]))?;
                self.des2.set_key(&Key::from(&bytes[8..16]))?;
                self.des3.set_key(&Key::from(&bytes[16..24]))?;
                self.two_key = false;
            }
            other => {
                return Err(CryptoError::InvalidKey(format!(
                    "TripleDES key must be 16 or 24 bytes, got {other}"
                )))
            }
        }
        self.keyed = true;
        Ok(())
    }

    fn is_valid_key(&self, key: &Key) -> bool {
        is_valid_triple_des_key(key)
    }

    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        match self.variant {
            // C = E_k3(D_k2(E_k1(P)))
            TripleDesVariant::Ede => self.cascade(
                [&self.des1, &self.des2, &self.des3],
                [false, true, false],
                input,
                output,
            ),
            // C = E_k3(E_k2(E_k1(P)))
            TripleDesVariant::Eee => self.cascade(
                [&self.des1, &self.des2, &self.des3],
                [false, false, false],
                input,
                output,
            ),
        }
    }

    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        match self.variant {
            // P = D_k1(E_k2(D_k3(C)))
            TripleDesVariant::Ede => self.cascade(
                [&self.des3, &self.des2, &self.des1],
                [true, false, true],
                input,
                output,
            ),
            // P = D_k1(D_k2(D_k3(C)))
            TripleDesVariant::Eee => self.cascade(
                [&self.des3, &self.des2, &self.des1],
                [true, true, true],
                input,
                output,
            ),
        }
    }
}
