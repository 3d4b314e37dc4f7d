use hex_literal::hex;
use quickcheck::quickcheck;
use symmetric_crypto::crypto::error::CryptoError;
use symmetric_crypto::crypto::padding::{
    make_padding, make_padding_by_name, AnsiX923Padding, Iso10126Padding, Padding, PaddingType,
    Pkcs7Padding, ZeroPadding,
};

fn tail_marker_schemes() -> Vec<Box<dyn Padding + Send + Sync>> {
    vec![
        Box::new(Pkcs7Padding),
        Box::new(AnsiX923Padding),
        Box::new(Iso10126Padding),
    ]
}

#[test]
fn test_pkcs7_full_block_on_aligned_input() {
    let data = hex!("41 42 43 44 45 46 47 48");
    let padded = Pkcs7Padding.pad(&data, 8).unwrap();
    assert_eq!(padded.len(), 16);
    assert!(padded[8..].iter().all(|&b| b == 0x08));
    assert_eq!(Pkcs7Padding.unpad(&padded).unwrap(), data);
}

#[test]
fn test_pkcs7_partial_block() {
    let data = [1u8, 2, 3];
    let padded = Pkcs7Padding.pad(&data, 8).unwrap();
    assert_eq!(padded, vec![1, 2, 3, 5, 5, 5, 5, 5]);
    assert_eq!(Pkcs7Padding.unpad(&padded).unwrap(), data);
}

#[test]
fn test_ansi_x923_layout() {
    let data = [1u8, 2, 3];
    let padded = AnsiX923Padding.pad(&data, 8).unwrap();
    assert_eq!(padded, vec![1, 2, 3, 0, 0, 0, 0, 5]);
    assert_eq!(AnsiX923Padding.unpad(&padded).unwrap(), data);
}

#[test]
fn test_iso10126_layout() {
    let data = [9u8, 8, 7];
    let padded = Iso10126Padding.pad(&data, 8).unwrap();
    assert_eq!(padded.len(), 8);
    assert_eq!(padded[7], 5);
    assert_eq!(&padded[..3], &data);
    assert_eq!(Iso10126Padding.unpad(&padded).unwrap(), data);
}

#[test]
fn test_zero_padding_alignment() {
    let data = [1u8, 2, 3];
    let padded = ZeroPadding.pad(&data, 8).unwrap();
    assert_eq!(padded, vec![1, 2, 3, 0, 0, 0, 0, 0]);
    assert_eq!(ZeroPadding.unpad(&padded).unwrap(), data);
}

#[test]
fn test_zero_padding_leaves_aligned_input_alone() {
    let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let padded = ZeroPadding.pad(&data, 8).unwrap();
    assert_eq!(padded.len(), 8);
    assert_eq!(padded, data);
}

#[test]
fn test_zero_padding_is_lossy_for_trailing_zeros() {
    // Documented hazard: trailing plaintext zeros are indistinguishable from
    // the pad.
    let data = [1u8, 2, 0];
    let padded = ZeroPadding.pad(&data, 8).unwrap();
    assert_eq!(ZeroPadding.unpad(&padded).unwrap(), vec![1, 2]);
}

#[test]
fn test_tail_markers_always_lengthen() {
    for scheme in tail_marker_schemes() {
        for len in 0..=17usize {
            let data: Vec<u8> = (0..len).map(|i| i as u8 + 1).collect();
            let padded = scheme.pad(&data, 8).unwrap();
            assert_eq!(padded.len() % 8, 0, "{} len {len}", scheme.name());
            assert!(padded.len() > data.len(), "{} len {len}", scheme.name());
            assert_eq!(scheme.unpad(&padded).unwrap(), data, "{}", scheme.name());
        }
    }
}

#[test]
fn test_unpad_rejects_empty_input() {
    for scheme in tail_marker_schemes() {
        let err = scheme.unpad(&[]).unwrap_err();
        assert!(matches!(err, CryptoError::BadPadding(_)), "{}", scheme.name());
    }
}

#[test]
fn test_unpad_rejects_zero_length_marker() {
    for scheme in tail_marker_schemes() {
        let err = scheme.unpad(&[1, 2, 3, 0]).unwrap_err();
        assert!(matches!(err, CryptoError::BadPadding(_)), "{}", scheme.name());
    }
}

#[test]
fn test_unpad_rejects_oversized_marker() {
    for scheme in tail_marker_schemes() {
        let err = scheme.unpad(&[1, 2, 9]).unwrap_err();
        assert!(matches!(err, CryptoError::BadPadding(_)), "{}", scheme.name());
    }
}

#[test]
fn test_pkcs7_rejects_inconsistent_fill() {
    let err = Pkcs7Padding.unpad(&[1, 2, 3, 4, 5, 6, 2, 3]).unwrap_err();
    assert!(matches!(err, CryptoError::BadPadding(_)));
}

#[test]
fn test_ansi_x923_rejects_nonzero_filler() {
    let err = AnsiX923Padding
        .unpad(&[1, 2, 3, 4, 5, 0, 7, 3])
        .unwrap_err();
    assert!(matches!(err, CryptoError::BadPadding(_)));
}

#[test]
fn test_iso10126_ignores_filler_contents() {
    // Only the length byte is validated.
    let unpadded = Iso10126Padding.unpad(&[1, 2, 0xAB, 0xCD, 3]).unwrap();
    assert_eq!(unpadded, vec![1, 2]);
}

#[test]
fn test_block_size_bounds() {
    for scheme in tail_marker_schemes() {
        assert!(matches!(
            scheme.pad(&[1, 2, 3], 0).unwrap_err(),
            CryptoError::InvalidInput(_)
        ));
        assert!(matches!(
            scheme.pad(&[1, 2, 3], 256).unwrap_err(),
            CryptoError::InvalidInput(_)
        ));
        assert!(scheme.pad(&[1, 2, 3], 255).is_ok());
        assert!(scheme.pad(&[1, 2, 3], 1).is_ok());
    }
    assert!(matches!(
        ZeroPadding.pad(&[1], 0).unwrap_err(),
        CryptoError::InvalidInput(_)
    ));
}

#[test]
fn test_validate() {
    let padded = Pkcs7Padding.pad(b"abc", 8).unwrap();
    assert!(Pkcs7Padding.validate(&padded));
    assert!(!Pkcs7Padding.validate(&[1, 2, 3, 0]));
    assert!(ZeroPadding.validate(&[0, 0, 0]));
}

#[test]
fn test_factory_by_tag() {
    assert_eq!(make_padding(PaddingType::Pkcs7).name(), "PKCS7");
    assert_eq!(make_padding(PaddingType::Zeros).name(), "ZeroPadding");
    assert_eq!(make_padding(PaddingType::AnsiX923).name(), "ANSI X9.23");
    assert_eq!(make_padding(PaddingType::Iso10126).name(), "ISO 10126");
    assert_eq!(
        make_padding(PaddingType::Pkcs7).padding_type(),
        PaddingType::Pkcs7
    );
}

#[test]
fn test_factory_by_name() {
    assert!(make_padding_by_name("PKCS7").is_ok());
    assert!(make_padding_by_name("pkcs7").is_ok());
    assert!(make_padding_by_name("ANSI X9.23").is_ok());
    assert!(make_padding_by_name("ISO_10126").is_ok());
    assert!(make_padding_by_name("zeros").is_ok());

    let err = make_padding_by_name("base64").unwrap_err();
    assert!(matches!(err, CryptoError::InvalidConfig(_)));
}

quickcheck! {
    fn prop_pkcs7_roundtrip(data: Vec<u8>) -> bool {
        let padded = Pkcs7Padding.pad(&data, 16).unwrap();
        Pkcs7Padding.unpad(&padded).unwrap() == data
    }

    fn prop_ansi_x923_roundtrip(data: Vec<u8>) -> bool {
        let padded = AnsiX923Padding.pad(&data, 16).unwrap();
        AnsiX923Padding.unpad(&padded).unwrap() == data
    }

    fn prop_iso10126_roundtrip(data: Vec<u8>) -> bool {
        let padded = Iso10126Padding.pad(&data, 16).unwrap();
        Iso10126Padding.unpad(&padded).unwrap() == data
    }

    fn prop_zero_padding_aligns(data: Vec<u8>) -> bool {
        let padded = ZeroPadding.pad(&data, 16).unwrap();
        padded.len() % 16 == 0 && padded.len() < data.len() + 16 && padded.len() >= data.len()
    }
}
