//! End-to-end checks of the mnemonic → address + signature pipeline against
//! hard-coded vectors.

use k256::ecdsa::signature::Verifier;
use k256::ecdsa::{Signature as EcdsaSignature, VerifyingKey};
use nimble_keygen::wallet::{derive_key, derive_seed, encode_account, sign, HdPath};
use nimble_keygen::{run_pipeline, KeygenConfig};

const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const COSMOS_PATH: &str = "m/44'/118'/0'/0/0";
const SOLANA_ADDRESS: &str = "6hKVbT9o5Q4mHPJr3u1nZ1h5Wq5fG3Fh5nQK3Y8qY7Zb";

fn decode_b64(value: &str) -> Vec<u8> {
    use base64::{engine::general_purpose::STANDARD, Engine};
    STANDARD.decode(value).unwrap()
}

#[test]
fn cosmos_fixture_identity() {
    let info = run_pipeline(ABANDON_ABOUT, SOLANA_ADDRESS, COSMOS_PATH, "cosmos").unwrap();

    assert_eq!(info.address, "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4");
    assert_eq!(info.pubkey, "Ak9OKtmcNNYLm6YoPJQxqEGK+GcyEpYfl6d7Y3f80Fti");
    assert_eq!(info.message, SOLANA_ADDRESS);
    assert_eq!(
        info.signature,
        "/zAyvSg/jkZenW6NOGltX3rhfpyUZwVMuh+/mCHITxoJa6T+R8l4xO+VERMCwUo92PXr3jRXcOLB53Mc2h9+Lw=="
    );
}

#[test]
fn signature_binds_to_the_reported_address() {
    let info = run_pipeline(ABANDON_ABOUT, SOLANA_ADDRESS, COSMOS_PATH, "nimble").unwrap();

    let pubkey = decode_b64(&info.pubkey);
    let verifying_key = VerifyingKey::from_sec1_bytes(&pubkey).unwrap();
    let signature = EcdsaSignature::from_slice(&decode_b64(&info.signature)).unwrap();
    assert!(verifying_key.verify(info.message.as_bytes(), &signature).is_ok());

    // The reported pubkey hashes to the reported address.
    let seed = derive_seed(ABANDON_ABOUT).unwrap();
    let key = derive_key(&seed, &COSMOS_PATH.parse().unwrap()).unwrap();
    let account = encode_account(&key, "nimble").unwrap();
    assert_eq!(account.address, info.address);
    assert_eq!(account.pubkey, pubkey);
}

#[test]
fn separate_derivations_agree() {
    let path: HdPath = COSMOS_PATH.parse().unwrap();
    let signing_key = derive_key(&derive_seed(ABANDON_ABOUT).unwrap(), &path).unwrap();
    let account_key = derive_key(&derive_seed(ABANDON_ABOUT).unwrap(), &path).unwrap();
    assert_eq!(signing_key, account_key);

    let sig = sign(&signing_key, SOLANA_ADDRESS.as_bytes()).unwrap();
    let account = encode_account(&account_key, "cosmos").unwrap();
    let verifying_key = VerifyingKey::from_sec1_bytes(&account.pubkey).unwrap();
    let parsed = EcdsaSignature::from_slice(sig.as_bytes()).unwrap();
    assert!(verifying_key.verify(SOLANA_ADDRESS.as_bytes(), &parsed).is_ok());
}

#[test]
fn prefix_changes_only_the_human_readable_part() {
    let seed = derive_seed(ABANDON_ABOUT).unwrap();
    let key = derive_key(&seed, &COSMOS_PATH.parse().unwrap()).unwrap();

    let cosmos = encode_account(&key, "cosmos").unwrap();
    let nimble = encode_account(&key, "nimble").unwrap();

    assert_eq!(cosmos.key_hash, nimble.key_hash);
    assert_eq!(cosmos.pubkey, nimble.pubkey);
    assert!(cosmos.address.starts_with("cosmos1"));
    assert!(nimble.address.starts_with("nimble1"));
    assert_eq!(nimble.address, "nimble19rl4cm2hmr8afy4kldpxz3fka4jguq0avdwmuq");
    // Same data part, different checksum.
    assert_eq!(cosmos.address[7..39], nimble.address[7..39]);
}

#[test]
fn punctuation_prefix_keeps_key_hash() {
    use bech32::FromBase32;

    let cosmos = run_pipeline(ABANDON_ABOUT, SOLANA_ADDRESS, COSMOS_PATH, "cosmos").unwrap();
    let dashed = run_pipeline(ABANDON_ABOUT, SOLANA_ADDRESS, COSMOS_PATH, "nim-ble").unwrap();
    assert_eq!(cosmos.signature, dashed.signature);

    let (hrp, data, _) = bech32::decode(&dashed.address).unwrap();
    assert_eq!(hrp, "nim-ble");
    assert_eq!(
        hex::encode(Vec::<u8>::from_base32(&data).unwrap()),
        "28ff5c6d57d8cfd492b6fb42614536ed648e01fd"
    );
}

#[test]
fn next_address_index_differs() {
    let info = run_pipeline(ABANDON_ABOUT, SOLANA_ADDRESS, "m/44'/118'/0'/0/1", "cosmos").unwrap();
    assert_eq!(info.address, "cosmos1jrkmdcwgq94uaamx6zax2luewlhf7u4kucx3kz");
}

#[test]
fn altered_checksum_word_never_yields_a_seed() {
    let altered = ABANDON_ABOUT.replace("about", "above");
    let err = run_pipeline(&altered, SOLANA_ADDRESS, COSMOS_PATH, "cosmos").unwrap_err();
    assert_eq!(err.kind(), "InvalidMnemonic");
}

#[test]
fn malformed_paths_are_rejected() {
    for path in ["", "m/abc", "44/0"] {
        let err = run_pipeline(ABANDON_ABOUT, SOLANA_ADDRESS, path, "cosmos").unwrap_err();
        assert_eq!(err.kind(), "InvalidPath", "path {:?}", path);
    }
}

#[test]
fn default_config_matches_cli_defaults() {
    let config = KeygenConfig::default();
    let info = run_pipeline(ABANDON_ABOUT, SOLANA_ADDRESS, &config.hd_path, &config.prefix).unwrap();
    assert!(info.address.starts_with("nimble1"));
}
