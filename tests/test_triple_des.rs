use hex_literal::hex;
use symmetric_crypto::crypto::des::Des;
use symmetric_crypto::crypto::error::CryptoError;
use symmetric_crypto::crypto::key::Key;
use symmetric_crypto::crypto::triple_des::{TripleDes, TripleDesVariant};
use symmetric_crypto::BlockCipher;

fn keyed(variant: TripleDesVariant, key: &[u8]) -> TripleDes {
    let mut cipher = TripleDes::new(variant);
    cipher.set_key(&Key::from(key)).unwrap();
    cipher
}

fn des_with(key: &[u8]) -> Des {
    let mut des = Des::new();
    des.set_key(&Key::from(key)).unwrap();
    des
}

#[test]
fn test_ede_equals_des_composition() {
    let key = hex!(
        "01 23 45 67 89 AB CD EF
         23 45 67 89 AB CD EF 01
         45 67 89 AB CD EF 01 23"
    );
    let plaintext = hex!("54 68 65 20 71 75 66 63");

    let cipher = keyed(TripleDesVariant::Ede, &key);
    let mut ciphertext = [0u8; 8];
    cipher.encrypt_block(&plaintext, &mut ciphertext).unwrap();

    // E_k1, then D_k2, then E_k3, by hand.
    let des1 = des_with(&key[0..8]);
    let des2 = des_with(&key[8..16]);
    let des3 = des_with(&key[16..24]);

    let mut stage1 = [0u8; 8];
    des1.encrypt_block(&plaintext, &mut stage1).unwrap();
    let mut stage2 = [0u8; 8];
    des2.decrypt_block(&stage1, &mut stage2).unwrap();
    let mut expected = [0u8; 8];
    des3.encrypt_block(&stage2, &mut expected).unwrap();

    assert_eq!(ciphertext, expected);

    let mut decrypted = [0u8; 8];
    cipher.decrypt_block(&ciphertext, &mut decrypted).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_eee_equals_des_composition() {
    let key: Vec<u8> = (0..24).map(|i| (i * 7 + 3) as u8).collect();
    let plaintext = hex!("00 11 22 33 44 55 66 77");

    let cipher = keyed(TripleDesVariant::Eee, &key);
    let mut ciphertext = [0u8; 8];
    cipher.encrypt_block(&plaintext, &mut ciphertext).unwrap();

    let des1 = des_with(&key[0..8]);
    let des2 = des_with(&key[8..16]);
    let des3 = des_with(&key[16..24]);

    let mut stage1 = [0u8; 8];
    des1.encrypt_block(&plaintext, &mut stage1).unwrap();
    let mut stage2 = [0u8; 8];
    des2.encrypt_block(&stage1, &mut stage2).unwrap();
    let mut expected = [0u8; 8];
    des3.encrypt_block(&stage2, &mut expected).unwrap();

    assert_eq!(ciphertext, expected);

    let mut decrypted = [0u8; 8];
    cipher.decrypt_block(&ciphertext, &mut decrypted).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_two_key_sets_k3_to_k1() {
    let two_key = hex!(
        "01 23 45 67 89 AB CD EF
         FE DC BA 98 76 54 32 10"
    );
    let mut three_key = two_key.to_vec();
    three_key.extend_from_slice(&two_key[0..8]);

    let plaintext = hex!("AA BB CC DD EE FF 00 11");

    let ede2 = keyed(TripleDesVariant::Ede, &two_key);
    let ede3 = keyed(TripleDesVariant::Ede, &three_key);

    let mut from_two = [0u8; 8];
    ede2.encrypt_block(&plaintext, &mut from_two).unwrap();
    let mut from_three = [0u8; 8];
    ede3.encrypt_block(&plaintext, &mut from_three).unwrap();

    assert_eq!(from_two, from_three);
}

#[test]
fn test_rejects_other_key_sizes() {
    for size in [0usize, 8, 15, 17, 23, 25, 32] {
        let mut cipher = TripleDes::new(TripleDesVariant::Ede);
        let err = cipher.set_key(&Key::new(vec![0x42; size])).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)), "size {size}");
    }
}

#[test]
fn test_block_op_before_set_key() {
    let cipher = TripleDes::new(TripleDesVariant::Ede);
    let mut out = [0u8; 8];
    let err = cipher.encrypt_block(&[0u8; 8], &mut out).unwrap_err();
    assert_eq!(err, CryptoError::CipherNotKeyed);
}

#[test]
fn test_metadata() {
    let ede = TripleDes::new(TripleDesVariant::Ede);
    assert_eq!(ede.name(), "TripleDES-EDE");
    assert_eq!(ede.block_size(), 8);

    let eee = TripleDes::new(TripleDesVariant::Eee);
    assert_eq!(eee.name(), "TripleDES-EEE");

    let mut keyed = TripleDes::new(TripleDesVariant::Ede);
    keyed.set_key(&Key::new((0..16).collect())).unwrap();
    assert_eq!(keyed.key_size(), 16);
    keyed.set_key(&Key::new((0..24).collect())).unwrap();
    assert_eq!(keyed.key_size(), 24);
}

#[test]
fn test_key_validator_rejects_repeated_byte() {
    let cipher = TripleDes::new(TripleDesVariant::Ede);
    assert!(!cipher.is_valid_key(&Key::new(vec![0x11; 24])));
    assert!(cipher.is_valid_key(&Key::new((0..24).collect())));
}
