//! Cipher-mode constructions over an arbitrary block cipher.
//!
//! A mode borrows its cipher through a shared handle and owns its padding.
//! The cipher must be keyed before the first block operation; re-keying it
//! while a mode is mid-operation is the caller's contract to avoid.

pub mod cbc;
pub mod cfb;
pub mod ctr;
pub mod ecb;
pub mod ofb;
pub mod pcbc;
pub mod random_delta;

pub use cbc::CbcMode;
pub use cfb::CfbMode;
pub use ctr::CtrMode;
pub use ecb::EcbMode;
pub use ofb::OfbMode;
pub use pcbc::PcbcMode;
pub use random_delta::RandomDeltaMode;

use rand::RngCore;
use std::sync::Arc;

use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::error::{CryptoError, Result};
use crate::crypto::padding::Padding;

pub type SharedCipher = Arc<dyn BlockCipher + Send + Sync>;
pub type OwnedPadding = Box<dyn Padding + Send + Sync>;

/// Inputs at or above this size take the rayon path in the modes that can
/// process blocks independently (ECB, CTR).
pub(crate) const PARALLEL_THRESHOLD: usize = 4 * 1024 * 1024;

/// Mode tags understood by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    Ecb,
    Cbc,
    Pcbc,
    Cfb,
    Ofb,
    Ctr,
    RandomDelta,
}

impl CipherMode {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "ECB" => Ok(CipherMode::Ecb),
            "CBC" => Ok(CipherMode::Cbc),
            "PCBC" => Ok(CipherMode::Pcbc),
            "CFB" => Ok(CipherMode::Cfb),
            "OFB" => Ok(CipherMode::Ofb),
            "CTR" => Ok(CipherMode::Ctr),
            "RandomDelta" | "RANDOM_DELTA" => Ok(CipherMode::RandomDelta),
            other => Err(CryptoError::InvalidConfig(format!(
                "unknown cipher mode: {other}"
            ))),
        }
    }
}

/// The contract every mode satisfies.
///
/// `encrypt`/`decrypt` are whole-message operations: they restart from the
/// configured IV, apply padding where the mode is block-oriented, and leave
/// repeated calls deterministic. The `_raw` variants bypass padding and
/// stream: chaining state carries over from call to call until `reset()`
/// rewinds it to the IV.
pub trait BlockCipherMode: Send {
    fn mode(&self) -> CipherMode;

    fn name(&self) -> String;

    fn set_cipher(&mut self, cipher: SharedCipher);

    fn set_padding(&mut self, padding: Option<OwnedPadding>);

    fn uses_padding(&self) -> bool;

    /// Replaces the IV. Length must equal the cipher's block size.
    fn set_iv(&mut self, iv: &[u8]) -> Result<()>;

    fn iv(&self) -> Vec<u8>;

    fn generate_random_iv(&mut self);

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>>;

    fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>>;

    fn encrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()>;

    fn decrypt_raw(&mut self, input: &[u8], output: &mut [u8]) -> Result<()>;

    /// Rewinds streaming state to the IV-defined starting point.
    fn reset(&mut self);
}

/// Builds a mode instance around a shared cipher and an optional padding.
/// Without an explicit IV the mode keeps the random one generated at
/// construction.
pub fn make_mode(
    mode: CipherMode,
    cipher: SharedCipher,
    padding: Option<OwnedPadding>,
    iv: Option<&[u8]>,
) -> Result<Box<dyn BlockCipherMode>> {
    let mut built: Box<dyn BlockCipherMode> = match mode {
        CipherMode::Ecb => Box::new(EcbMode::new(cipher, padding)),
        CipherMode::Cbc => Box::new(CbcMode::new(cipher, padding)),
        CipherMode::Pcbc => Box::new(PcbcMode::new(cipher, padding)),
        CipherMode::Cfb => Box::new(CfbMode::new(cipher, padding)),
        CipherMode::Ofb => Box::new(OfbMode::new(cipher, padding)),
        CipherMode::Ctr => Box::new(CtrMode::new(cipher, padding)),
        CipherMode::RandomDelta => Box::new(RandomDeltaMode::new(cipher, padding)),
    };
    if let Some(iv) = iv {
        built.set_iv(iv)?;
    }
    Ok(built)
}

pub(crate) fn random_iv(block_size: usize) -> Vec<u8> {
    let mut iv = vec![0u8; block_size];
    rand::rng().fill_bytes(&mut iv);
    iv
}

pub(crate) fn encrypt_block_vec(cipher: &dyn BlockCipher, block: &[u8]) -> Result<Vec<u8>> {
    let mut output = vec![0u8; block.len()];
    cipher.encrypt_block(block, &mut output)?;
    Ok(output)
}

pub(crate) fn decrypt_block_vec(cipher: &dyn BlockCipher, block: &[u8]) -> Result<Vec<u8>> {
    let mut output = vec![0u8; block.len()];
    cipher.decrypt_block(block, &mut output)?;
    Ok(output)
}

pub(crate) fn ensure_block_multiple(len: usize, block_size: usize, mode: &str) -> Result<()> {
    if block_size == 0 || len % block_size != 0 {
        return Err(CryptoError::InvalidInput(format!(
            "{mode}: input length {len} is not a multiple of the {block_size} byte block size"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_same_length(input: &[u8], output: &[u8]) -> Result<()> {
    if input.len() != output.len() {
        return Err(CryptoError::InvalidInput(format!(
            "output buffer length {} does not match input length {}",
            output.len(),
            input.len()
        )));
    }
    Ok(())
}

pub(crate) fn ensure_iv_length(iv: &[u8], block_size: usize) -> Result<()> {
    if iv.len() != block_size {
        return Err(CryptoError::InvalidInput(format!(
            "IV length {} does not match the {} byte block size",
            iv.len(),
            block_size
        )));
    }
    Ok(())
}

/// Pads for a block-oriented encryption, or verifies alignment when no
/// padding is attached.
pub(crate) fn pad_for_encrypt(
    padding: &Option<OwnedPadding>,
    data: &[u8],
    block_size: usize,
    mode: &str,
) -> Result<Vec<u8>> {
    match padding {
        Some(padding) => padding.pad(data, block_size),
        None => {
            ensure_block_multiple(data.len(), block_size, mode)?;
            Ok(data.to_vec())
        }
    }
}

pub(crate) fn unpad_after_decrypt(
    padding: &Option<OwnedPadding>,
    data: Vec<u8>,
) -> Result<Vec<u8>> {
    match padding {
        Some(padding) => padding.unpad(&data),
        None => Ok(data),
    }
}
