pub mod crypto;

pub use crypto::cipher_traits::BlockCipher;
pub use crypto::error::{CryptoError, Result};
pub use crypto::key::Key;
pub use crypto::modes::{make_mode, BlockCipherMode, CipherMode};
pub use crypto::padding::{make_padding, Padding, PaddingType};
