mod common;

use data_encoding::BASE64;
use rand::{Rng, RngCore};
use tokenizer_auth::{EncodedSecret, MIN_KEY_LEN, derive_key, encode_secret};
use tokenizer_core::TokenError;

use common::{SECRET, test_secret};

#[test]
fn test_encode_secret_decodes_to_original() {
    let encoded = test_secret();
    let decoded = BASE64.decode(encoded.as_str().as_bytes()).unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), SECRET);
}

#[test]
fn test_round_trip_random_secrets() {
    let mut rng = rand::thread_rng();
    for _ in 0..64 {
        let len = rng.gen_range(0..128);
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);

        assert_eq!(encode_secret(&bytes).decode().unwrap(), bytes);
    }
}

#[test]
fn test_encode_secret_is_deterministic() {
    assert_eq!(encode_secret(SECRET), encode_secret(SECRET));
}

#[test]
fn test_preencoded_secret_matches_encoded() {
    let from_config = EncodedSecret::new("TGVlSmFlaHllb2s2Mzc2MzcxMjMyMzEyMzEyMzExMjM=");
    assert_eq!(from_config, test_secret());
}

#[test]
fn test_derive_key_minimum_length_boundary() {
    let short = encode_secret(vec![1u8; MIN_KEY_LEN - 1]);
    assert!(matches!(derive_key(&short), Err(TokenError::Key { .. })));

    let exact = encode_secret(vec![1u8; MIN_KEY_LEN]);
    assert!(derive_key(&exact).is_ok());
}

#[test]
fn test_derive_key_empty_secret() {
    let result = derive_key(&encode_secret(""));
    assert!(matches!(result, Err(TokenError::Key { .. })));
}
