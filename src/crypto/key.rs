use crate::crypto::error::{CryptoError, Result};

/// Raw key material. Immutable once constructed; ciphers derive their round
/// keys from it and never hold on to the `Key` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    data: Vec<u8>,
}

impl Key {
    pub fn new(data: Vec<u8>) -> Self {
        Key { data }
    }

    /// Parses lowercase or uppercase hex without separators. Odd-length
    /// strings and non-hex digits are rejected.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() % 2 != 0 {
            return Err(CryptoError::InvalidKey(format!(
                "hex key has odd length {}",
                hex.len()
            )));
        }
        let data = const_hex::decode(hex)
            .map_err(|e| CryptoError::InvalidKey(format!("hex key: {e}")))?;
        Ok(Key { data })
    }

    /// Lowercase hex, no separators.
    pub fn to_hex(&self) -> String {
        const_hex::encode(&self.data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Key::new(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(bytes: Vec<u8>) -> Self {
        Key::new(bytes)
    }
}
