//! Encrypted transfer records.
//!
//! A record is the compact JSON object `{"recipient": ..., "memo": ...}`
//! zero-padded to the 88-byte window of a 128-byte envelope. JSON escapes
//! control characters, so the serialized form never contains a NUL and the
//! padding can be stripped unambiguously.

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::Zeroizing;

use crate::envelope::{self, window_len};
use crate::key::EncryptionKey;
use crate::{trim_padding, CodecError, Result};

/// Size of an encrypted record.
pub const RECORD_ENVELOPE_LEN: usize = 128;

/// Plaintext window inside a record envelope.
pub const RECORD_WINDOW_LEN: usize = window_len(RECORD_ENVELOPE_LEN);

/// An encrypted transfer record as stored in an account.
pub type EncryptedRecord = [u8; RECORD_ENVELOPE_LEN];

/// Who a scheduled transfer pays, and an optional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub recipient: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub memo: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize)]
struct RecordRef<'a> {
    recipient: &'a str,
    memo: &'a str,
}

/// Encrypt a recipient and memo under `key` with a fresh nonce.
///
/// Records whose JSON form exceeds the window are rejected with
/// [`CodecError::InvalidInputLength`]; nothing is truncated.
pub fn encrypt_record(recipient: &str, memo: &str, key: &EncryptionKey) -> Result<EncryptedRecord> {
    let json = Zeroizing::new(
        serde_json::to_vec(&RecordRef { recipient, memo })
            .map_err(|e| CodecError::MalformedRecord(e.to_string()))?,
    );

    if json.len() > RECORD_WINDOW_LEN {
        return Err(CodecError::InvalidInputLength {
            expected: RECORD_WINDOW_LEN,
            actual: json.len(),
        });
    }

    let mut window = Zeroizing::new([0u8; RECORD_WINDOW_LEN]);
    window[..json.len()].copy_from_slice(&json);
    envelope::seal(key, window.as_slice())
}

/// Decrypt a 128-byte record envelope.
///
/// A record whose `memo` is missing or `null` decodes with an empty memo.
pub fn decrypt_record(data: &[u8], key: &EncryptionKey) -> Result<TransferRecord> {
    let window = envelope::open(key, data, RECORD_ENVELOPE_LEN)?;
    serde_json::from_slice(trim_padding(&window))
        .map_err(|e| CodecError::MalformedRecord(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{seal_with_nonce, NONCE_SIZE};

    const RECIPIENT: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    fn key() -> EncryptionKey {
        EncryptionKey::from_signature(&[0x33u8; 64])
    }

    fn sealed_json(json: &[u8]) -> EncryptedRecord {
        let mut window = [0u8; RECORD_WINDOW_LEN];
        window[..json.len()].copy_from_slice(json);
        seal_with_nonce(&key(), &[1u8; NONCE_SIZE], &window).expect("seal")
    }

    #[test]
    fn test_roundtrip() {
        let env = encrypt_record(RECIPIENT, "rent", &key()).expect("encrypt");
        assert_eq!(env.len(), RECORD_ENVELOPE_LEN);
        let record = decrypt_record(&env, &key()).expect("decrypt");
        assert_eq!(
            record,
            TransferRecord {
                recipient: RECIPIENT.to_string(),
                memo: "rent".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_memo() {
        let env = encrypt_record(RECIPIENT, "", &key()).expect("encrypt");
        assert_eq!(decrypt_record(&env, &key()).expect("decrypt").memo, "");
    }

    #[test]
    fn test_missing_memo_defaults_to_empty() {
        let env = sealed_json(br#"{"recipient":"abc"}"#);
        let record = decrypt_record(&env, &key()).expect("decrypt");
        assert_eq!(record.recipient, "abc");
        assert_eq!(record.memo, "");
    }

    #[test]
    fn test_null_memo_defaults_to_empty() {
        let env = sealed_json(br#"{"recipient":"abc","memo":null}"#);
        let record = decrypt_record(&env, &key()).expect("decrypt");
        assert_eq!(record.recipient, "abc");
        assert_eq!(record.memo, "");
    }

    #[test]
    fn test_memo_with_nul_survives_padding() {
        let env = encrypt_record("abc", "a\0", &key()).expect("encrypt");
        assert_eq!(decrypt_record(&env, &key()).expect("decrypt").memo, "a\0");
    }

    #[test]
    fn test_oversized_record_rejected() {
        let memo = "x".repeat(60);
        assert!(matches!(
            encrypt_record(RECIPIENT, &memo, &key()),
            Err(CodecError::InvalidInputLength { expected: 88, .. })
        ));
    }

    #[test]
    fn test_record_filling_window_exactly() {
        // {"recipient":"","memo":""} is 26 bytes.
        let recipient = "r".repeat(RECORD_WINDOW_LEN - 26);
        let env = encrypt_record(&recipient, "", &key()).expect("encrypt");
        assert_eq!(
            decrypt_record(&env, &key()).expect("decrypt").recipient,
            recipient
        );
    }

    #[test]
    fn test_wrong_key_fails() {
        let env = encrypt_record(RECIPIENT, "rent", &key()).expect("encrypt");
        let other = EncryptionKey::from_signature(&[0x34u8; 64]);
        assert_eq!(
            decrypt_record(&env, &other),
            Err(CodecError::DecryptionFailed)
        );
    }

    #[test]
    fn test_non_json_window_is_malformed() {
        let env = sealed_json(b"not json");
        assert!(matches!(
            decrypt_record(&env, &key()),
            Err(CodecError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_missing_recipient_is_malformed() {
        let env = sealed_json(br#"{"memo":"x"}"#);
        assert!(matches!(
            decrypt_record(&env, &key()),
            Err(CodecError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            decrypt_record(&[0u8; 64], &key()),
            Err(CodecError::InvalidInputLength {
                expected: 128,
                actual: 64
            })
        ));
    }
}
