//! Integration test: private vault balance and scheduled transfer.
//!
//! Exercises the vault data path without a ledger:
//! 1. Wallet signs the key-derivation message; the key is derived
//! 2. Deposit: the encrypted balance is written to an account field
//! 3. Withdraw: balance is decrypted, updated, re-encrypted; a nullifier
//!    is recorded for the withdrawal
//! 4. Scheduled transfer record is encrypted and read back
//! 5. Another wallet cannot read any field

use std::collections::HashSet;

use subly_codec::label::{decrypt_label, encrypt_label, NAME_ENVELOPE_LEN};
use subly_codec::{
    decrypt_record, decrypt_u64, encrypt_record, encrypt_u64, CodecError, EncryptionKey,
    KEY_DERIVATION_MESSAGE,
};
use subly_commitment::{commit, generate_secret, nullify};
use subly_crypto::ed25519::SigningKey;
use subly_types::{ContextId, Nullifier, OperationTag};

fn wallet_key(seed: u8) -> EncryptionKey {
    let wallet = SigningKey::from_bytes(&[seed; 32]);
    let signature = wallet.sign(KEY_DERIVATION_MESSAGE.as_bytes());
    EncryptionKey::from_signature(&signature.to_bytes())
}

#[test]
fn vault_deposit_withdraw_transfer() {
    // =========================================================
    // Step 1: Key derivation is reproducible per wallet
    // =========================================================
    let key = wallet_key(0x21);
    assert_eq!(key.as_bytes(), wallet_key(0x21).as_bytes());

    let secret = generate_secret().expect("secret");
    let pool = ContextId::from_bytes([0x90; 32]);
    let deposit_commitment = commit(&secret, &pool);

    // =========================================================
    // Step 2: Deposit 1_000_000
    // =========================================================
    let mut balance_field = encrypt_u64(1_000_000, &key).expect("encrypt");
    assert_eq!(balance_field.len(), 64);

    // =========================================================
    // Step 3: Two withdrawals of 250_000
    // =========================================================
    let mut spent: HashSet<Nullifier> = HashSet::new();
    for nonce in 0..2u64 {
        let balance = decrypt_u64(&balance_field, &key).expect("decrypt");
        let updated = encrypt_u64(balance - 250_000, &key).expect("encrypt");
        assert_ne!(updated, balance_field);
        balance_field = updated;

        let nullifier = nullify(&secret, OperationTag::Withdraw, nonce);
        assert_ne!(nullifier.as_bytes(), deposit_commitment.as_bytes());
        assert!(spent.insert(nullifier), "nullifier reused");
    }
    assert_eq!(decrypt_u64(&balance_field, &key).expect("decrypt"), 500_000);

    // Replaying the first withdrawal yields a nullifier already spent.
    assert!(spent.contains(&nullify(&secret, OperationTag::Withdraw, 0)));

    // =========================================================
    // Step 4: Scheduled transfer record
    // =========================================================
    let recipient = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";
    let record_field = encrypt_record(recipient, "monthly", &key).expect("encrypt");
    assert_eq!(record_field.len(), 128);
    let record = decrypt_record(&record_field, &key).expect("decrypt");
    assert_eq!(record.recipient, recipient);
    assert_eq!(record.memo, "monthly");

    // =========================================================
    // Step 5: A different wallet reads nothing
    // =========================================================
    let other = wallet_key(0x22);
    assert_eq!(
        decrypt_u64(&balance_field, &other),
        Err(CodecError::DecryptionFailed)
    );
    assert_eq!(
        decrypt_record(&record_field, &other),
        Err(CodecError::DecryptionFailed)
    );
}

#[test]
fn corrupted_balance_is_rejected_not_zeroed() {
    let key = EncryptionKey::from_password("offline vault");
    let mut field = encrypt_u64(1_000_000, &key).expect("encrypt");
    field[40] ^= 0xff;
    assert_eq!(decrypt_u64(&field, &key), Err(CodecError::DecryptionFailed));
}

#[test]
fn plan_name_is_encrypted_for_business() {
    let key = wallet_key(0x31);
    let field = encrypt_label::<NAME_ENVELOPE_LEN>("Pro Monthly", &key).expect("encrypt");
    assert!(!field.windows(3).any(|w| w == b"Pro"));
    assert_eq!(
        decrypt_label::<NAME_ENVELOPE_LEN>(&field, &key).expect("decrypt"),
        "Pro Monthly"
    );
}
