use rand::RngCore;

use crate::crypto::error::{CryptoError, Result};

/// Padding scheme tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingType {
    Zeros,
    Pkcs7,
    AnsiX923,
    Iso10126,
}

impl PaddingType {
    /// Textual tag lookup, accepting the spellings the original tooling used.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "ZeroPadding" | "ZEROS" | "zeros" => Ok(PaddingType::Zeros),
            "PKCS7" | "pkcs7" => Ok(PaddingType::Pkcs7),
            "ANSI_X923" | "ANSI X9.23" => Ok(PaddingType::AnsiX923),
            "ISO_10126" | "ISO 10126" => Ok(PaddingType::Iso10126),
            other => Err(CryptoError::InvalidConfig(format!(
                "unknown padding name: {other}"
            ))),
        }
    }
}

/// A stateless, reversible block-alignment transform.
///
/// For every scheme, `unpad(pad(data, b)) == data`. The three tail-marker
/// schemes always append between 1 and `b` bytes, so their output is a
/// positive multiple of `b` strictly longer than the input; zero padding
/// appends only up to alignment.
pub trait Padding: std::fmt::Debug {
    fn padding_type(&self) -> PaddingType;

    fn name(&self) -> String;

    fn pad(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>>;

    fn unpad(&self, padded: &[u8]) -> Result<Vec<u8>>;

    /// Non-erroring structural check of an already-padded buffer.
    fn validate(&self, padded: &[u8]) -> bool;
}

/// Factory over the tag enum.
pub fn make_padding(padding_type: PaddingType) -> Box<dyn Padding + Send + Sync> {
    match padding_type {
        PaddingType::Zeros => Box::new(ZeroPadding),
        PaddingType::Pkcs7 => Box::new(Pkcs7Padding),
        PaddingType::AnsiX923 => Box::new(AnsiX923Padding),
        PaddingType::Iso10126 => Box::new(Iso10126Padding),
    }
}

/// Factory over the textual tag.
pub fn make_padding_by_name(name: &str) -> Result<Box<dyn Padding + Send + Sync>> {
    Ok(make_padding(PaddingType::from_name(name)?))
}

fn check_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 || block_size > 255 {
        return Err(CryptoError::InvalidInput(format!(
            "padding block size must be between 1 and 255, got {block_size}"
        )));
    }
    Ok(())
}

/// Reads and bounds-checks the declared pad length in the last byte.
fn declared_pad_len(scheme: &str, padded: &[u8]) -> Result<usize> {
    let last = *padded.last().ok_or_else(|| {
        CryptoError::BadPadding(format!("{scheme}: cannot unpad empty input"))
    })?;
    let pad_len = last as usize;
    if pad_len == 0 {
        return Err(CryptoError::BadPadding(format!(
            "{scheme}: padding size cannot be zero"
        )));
    }
    if pad_len > padded.len() {
        return Err(CryptoError::BadPadding(format!(
            "{scheme}: padding size {pad_len} exceeds input length {}",
            padded.len()
        )));
    }
    Ok(pad_len)
}

/// Pads with zero bytes up to the next block boundary; already-aligned input
/// is left untouched.
///
/// Unpadding strips every trailing zero byte and never fails, which makes the
/// scheme lossy for plaintexts that genuinely end in `0x00`. Known hazard of
/// the scheme; prefer one of the tail-marker schemes when the plaintext is
/// arbitrary binary.
#[derive(Debug)]
pub struct ZeroPadding;

impl Padding for ZeroPadding {
    fn padding_type(&self) -> PaddingType {
        PaddingType::Zeros
    }

    fn name(&self) -> String {
        "ZeroPadding".to_string()
    }

    fn pad(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        check_block_size(block_size)?;
        let remainder = data.len() % block_size;
        let mut padded = data.to_vec();
        if remainder != 0 {
            padded.resize(data.len() + block_size - remainder, 0);
        }
        Ok(padded)
    }

    fn unpad(&self, padded: &[u8]) -> Result<Vec<u8>> {
        let mut data = padded.to_vec();
        while data.last() == Some(&0) {
            data.pop();
        }
        Ok(data)
    }

    fn validate(&self, _padded: &[u8]) -> bool {
        true
    }
}

/// PKCS#7: `p` copies of the byte value `p`, `p` in `1..=block_size`.
#[derive(Debug)]
pub struct Pkcs7Padding;

impl Padding for Pkcs7Padding {
    fn padding_type(&self) -> PaddingType {
        PaddingType::Pkcs7
    }

    fn name(&self) -> String {
        "PKCS7".to_string()
    }

    fn pad(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        check_block_size(block_size)?;
        let pad_len = block_size - data.len() % block_size;
        let mut padded = data.to_vec();
        padded.resize(data.len() + pad_len, pad_len as u8);
        Ok(padded)
    }

    fn unpad(&self, padded: &[u8]) -> Result<Vec<u8>> {
        let pad_len = declared_pad_len("PKCS7", padded)?;
        let boundary = padded.len() - pad_len;
        if !padded[boundary..].iter().all(|&b| b as usize == pad_len) {
            return Err(CryptoError::BadPadding(
                "PKCS7: pad bytes do not all match the declared length".to_string(),
            ));
        }
        Ok(padded[..boundary].to_vec())
    }

    fn validate(&self, padded: &[u8]) -> bool {
        self.unpad(padded).is_ok()
    }
}

/// ANSI X9.23: `p - 1` zero bytes followed by the length byte `p`.
#[derive(Debug)]
pub struct AnsiX923Padding;

impl Padding for AnsiX923Padding {
    fn padding_type(&self) -> PaddingType {
        PaddingType::AnsiX923
    }

    fn name(&self) -> String {
        "ANSI X9.23".to_string()
    }

    fn pad(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        check_block_size(block_size)?;
        let pad_len = block_size - data.len() % block_size;
        let mut padded = data.to_vec();
        padded.resize(data.len() + pad_len - 1, 0);
        padded.push(pad_len as u8);
        Ok(padded)
    }

    fn unpad(&self, padded: &[u8]) -> Result<Vec<u8>> {
        let pad_len = declared_pad_len("ANSI X9.23", padded)?;
        let boundary = padded.len() - pad_len;
        if !padded[boundary..padded.len() - 1].iter().all(|&b| b == 0) {
            return Err(CryptoError::BadPadding(
                "ANSI X9.23: filler bytes must be zero".to_string(),
            ));
        }
        Ok(padded[..boundary].to_vec())
    }

    fn validate(&self, padded: &[u8]) -> bool {
        self.unpad(padded).is_ok()
    }
}

/// ISO 10126: `p - 1` random bytes followed by the length byte `p`. Only the
/// length byte is validated on removal.
#[derive(Debug)]
pub struct Iso10126Padding;

impl Padding for Iso10126Padding {
    fn padding_type(&self) -> PaddingType {
        PaddingType::Iso10126
    }

    fn name(&self) -> String {
        "ISO 10126".to_string()
    }

    fn pad(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        check_block_size(block_size)?;
        let pad_len = block_size - data.len() % block_size;
        let mut filler = vec![0u8; pad_len - 1];
        rand::rng().fill_bytes(&mut filler);

        let mut padded = data.to_vec();
        padded.extend_from_slice(&filler);
        padded.push(pad_len as u8);
        Ok(padded)
    }

    fn unpad(&self, padded: &[u8]) -> Result<Vec<u8>> {
        let pad_len = declared_pad_len("ISO 10126", padded)?;
        Ok(padded[..padded.len() - pad_len].to_vec())
    }

    fn validate(&self, padded: &[u8]) -> bool {
        self.unpad(padded).is_ok()
    }
}
