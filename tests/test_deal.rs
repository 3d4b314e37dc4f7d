use hex_literal::hex;
use symmetric_crypto::crypto::deal::Deal;
use symmetric_crypto::crypto::error::CryptoError;
use symmetric_crypto::crypto::key::Key;
use symmetric_crypto::BlockCipher;

fn keyed_deal(key: &[u8]) -> Deal {
    let mut deal = Deal::new(key.len()).unwrap();
    deal.set_key(&Key::from(key)).unwrap();
    deal
}

#[test]
fn test_roundtrip_all_key_sizes() {
    let material: Vec<u8> = (0u8..32).map(|i| i.wrapping_mul(37).wrapping_add(11)).collect();
    let plaintext = hex!("00 11 22 33 44 55 66 77 88 99 AA BB CC DD EE FF");

    for key_size in [16usize, 24, 32] {
        let deal = keyed_deal(&material[..key_size]);

        let mut ciphertext = [0u8; 16];
        deal.encrypt_block(&plaintext, &mut ciphertext).unwrap();
        assert_ne!(ciphertext, plaintext);

        let mut decrypted = [0u8; 16];
        deal.decrypt_block(&ciphertext, &mut decrypted).unwrap();
        assert_eq!(decrypted, plaintext, "key size {key_size}");
    }
}

#[test]
fn test_reference_vectors() {
    // Golden ciphertexts computed with the reference key schedule and
    // Feistel network, one per key size.
    let plaintext = hex!("00 11 22 33 44 55 66 77 88 99 AA BB CC DD EE FF");
    let material: Vec<u8> = (0u8..32).collect();

    let expectations: [(usize, [u8; 16]); 3] = [
        (16, hex!("2A 2A E4 62 00 4C 7D 39 6A EB 50 F3 2A 37 76 12")),
        (24, hex!("7D B8 EF 26 F7 81 1B 13 52 B0 01 7D 3F E0 98 4A")),
        (32, hex!("F0 78 47 C7 30 28 02 E7 C0 B9 DD 30 34 F8 19 72")),
    ];

    for (key_size, expected) in expectations {
        let deal = keyed_deal(&material[..key_size]);
        let mut ciphertext = [0u8; 16];
        deal.encrypt_block(&plaintext, &mut ciphertext).unwrap();
        assert_eq!(ciphertext, expected, "key size {key_size}");

        let mut decrypted = [0u8; 16];
        deal.decrypt_block(&ciphertext, &mut decrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn test_reference_vector_mixed_key() {
    let key = hex!(
        "01 23 45 67 89 AB CD EF
         13 34 57 79 9B BC DF F1
         FE DC BA 98 76 54 32 10"
    );
    let plaintext = hex!("41 42 43 44 45 46 47 48 49 4A 4B 4C 4D 4E 4F 50");
    let expected = hex!("6F EE D4 6E 04 A8 6E 93 2A 4F 98 24 C3 14 71 8E");

    let deal = keyed_deal(&key);
    let mut ciphertext = [0u8; 16];
    deal.encrypt_block(&plaintext, &mut ciphertext).unwrap();
    assert_eq!(ciphertext, expected);
}

#[test]
fn test_schedule_uses_only_leading_key_bytes() {
    // Reference-schedule quirk: every subkey is drawn from the first two
    // key chunks (the first chunk alone for 16-byte keys), so tweaking the
    // tail must not change the ciphertext while tweaking the head must.
    let base = hex!(
        "01 23 45 67 89 AB CD EF
         13 34 57 79 9B BC DF F1
         FE DC BA 98 76 54 32 10"
    );
    let plaintext = [0x5Au8; 16];

    let reference = {
        let deal = keyed_deal(&base);
        let mut out = [0u8; 16];
        deal.encrypt_block(&plaintext, &mut out).unwrap();
        out
    };

    for index in [0usize, 8] {
        let mut tweaked = base;
        tweaked[index] ^= 0x80;
        let deal = keyed_deal(&tweaked);
        let mut out = [0u8; 16];
        deal.encrypt_block(&plaintext, &mut out).unwrap();
        assert_ne!(out, reference, "byte {index} ignored");
    }

    let mut tweaked = base;
    tweaked[16] ^= 0x80;
    tweaked[23] ^= 0x80;
    let deal = keyed_deal(&tweaked);
    let mut out = [0u8; 16];
    deal.encrypt_block(&plaintext, &mut out).unwrap();
    assert_eq!(out, reference);
}

#[test]
fn test_rejects_bad_key_size_selector() {
    assert!(matches!(
        Deal::new(20).unwrap_err(),
        CryptoError::InvalidKey(_)
    ));
    assert!(matches!(
        Deal::new(0).unwrap_err(),
        CryptoError::InvalidKey(_)
    ));
}

#[test]
fn test_set_key_enforces_selector() {
    let mut deal = Deal::new(24).unwrap();
    let err = deal.set_key(&Key::new(vec![0x42; 16])).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKey(_)));
}

#[test]
fn test_block_op_before_set_key() {
    let deal = Deal::new(16).unwrap();
    let mut out = [0u8; 16];
    let err = deal.encrypt_block(&[0u8; 16], &mut out).unwrap_err();
    assert_eq!(err, CryptoError::CipherNotKeyed);
}

#[test]
fn test_rejects_wrong_block_size() {
    let deal = keyed_deal(&[0x5A; 16]);
    let mut out = [0u8; 16];
    let err = deal.encrypt_block(&[0u8; 8], &mut out).unwrap_err();
    assert_eq!(
        err,
        CryptoError::InvalidBlockSize {
            expected: 16,
            actual: 8
        }
    );
}

#[test]
fn test_metadata() {
    assert_eq!(Deal::new(16).unwrap().name(), "DEAL-128");
    assert_eq!(Deal::new(24).unwrap().name(), "DEAL-192");
    assert_eq!(Deal::new(32).unwrap().name(), "DEAL-256");
    assert_eq!(Deal::new(16).unwrap().block_size(), 16);
    assert_eq!(Deal::new(32).unwrap().key_size(), 32);
}

#[test]
fn test_key_validator() {
    let deal = Deal::new(16).unwrap();
    assert!(deal.is_valid_key(&Key::new((0..16).collect())));
    assert!(!deal.is_valid_key(&Key::new(vec![0x00; 16])));
    assert!(!deal.is_valid_key(&Key::new(vec![0x01; 20])));
}
