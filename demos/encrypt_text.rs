use std::sync::Arc;

use rand::RngCore;
use symmetric_crypto::crypto::deal::Deal;
use symmetric_crypto::crypto::des::Des;
use symmetric_crypto::crypto::key::Key;
use symmetric_crypto::{make_mode, make_padding, BlockCipher, CipherMode, PaddingType, Result};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

fn main() -> Result<()> {
    let text = "The quick brown fox jumps over the lazy dog. Symmetric encryption test string!";
    let data = text.as_bytes();

    // === DES ===
    let mut des = Des::new();
    des.set_key(&Key::new(random_bytes(8)))?;
    let cipher: Arc<dyn BlockCipher + Send + Sync> = Arc::new(des);

    let mut mode = make_mode(
        CipherMode::Cbc,
        cipher,
        Some(make_padding(PaddingType::Pkcs7)),
        None,
    )?;

    let encrypted = mode.encrypt(data)?;
    let decrypted = mode.decrypt(&encrypted)?;
    assert_eq!(data, &decrypted[..]);
    println!("DES CBC+PKCS7 OK ({} -> {} bytes)", data.len(), encrypted.len());

    // === DEAL ===
    let mut deal = Deal::new(24)?;
    deal.set_key(&Key::new(random_bytes(24)))?;
    let cipher: Arc<dyn BlockCipher + Send + Sync> = Arc::new(deal);

    let mut mode = make_mode(
        CipherMode::Ctr,
        cipher,
        None,
        None,
    )?;

    let encrypted = mode.encrypt(data)?;
    let decrypted = mode.decrypt(&encrypted)?;
    assert_eq!(data, &decrypted[..]);
    println!("DEAL CTR OK ({} -> {} bytes)", data.len(), encrypted.len());

    Ok(())
}
