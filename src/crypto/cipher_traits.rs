use crate::crypto::error::Result;
use crate::crypto::key::Key;

/// A keyed permutation on fixed-size blocks.
///
/// Implementations start unkeyed; `encrypt_block`/`decrypt_block` fail with
/// `CipherNotKeyed` until a `set_key` succeeds. After keying, the round keys
/// are read-only, so a shared instance may serve concurrent block calls as
/// long as nobody re-keys it mid-flight.
pub trait BlockCipher {
    fn name(&self) -> String;

    fn block_size(&self) -> usize;

    fn key_size(&self) -> usize;

    /// Validates the key length and derives the round keys. Replaces any
    /// previously installed schedule.
    fn set_key(&mut self, key: &Key) -> Result<()>;

    /// Structural key check (length, degenerate patterns). Not enforced by
    /// `set_key`; see `utils::is_strong_des_key` for the DES parity and
    /// weak-key tables.
    fn is_valid_key(&self, key: &Key) -> bool;

    /// Encrypts one block. `input` and `output` must both be exactly
    /// `block_size()` bytes.
    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()>;

    /// Decrypts one block. Same length contract as `encrypt_block`.
    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<()>;
}
