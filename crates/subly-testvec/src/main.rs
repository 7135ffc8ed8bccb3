//! Test vector generator for the Subly primitives.
//!
//! Writes `tests/fixtures/test_vectors.json`, the reference other client
//! implementations check themselves against.
//!
//! Usage:
//!   subly-testvec              # Generate test_vectors.json
//!   subly-testvec --verify     # Verify test_vectors.json matches this build

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use subly_codec::EncryptionKey;
use subly_crypto::ed25519::{KeyPair, SigningKey};
use subly_crypto::{sha512, xchacha20};
use subly_membership::{proof_message, MembershipProof, ValidityProof};
use subly_types::{Commitment, ContextId, OperationTag, Secret};
use tracing::{error, info};

const FIXTURE_PATH: &str = "tests/fixtures/test_vectors.json";

#[derive(Serialize, Deserialize)]
struct TestVectors {
    version: String,
    generated_by: String,
    vectors: BTreeMap<String, TestVector>,
}

#[derive(Serialize, Deserialize)]
struct TestVector {
    description: String,
    inputs: BTreeMap<String, String>,
    outputs: BTreeMap<String, String>,
}

fn generate_hash_vectors() -> BTreeMap<String, TestVector> {
    let mut vectors = BTreeMap::new();

    let digest = sha512::hash32(b"Subly test vector 1");
    vectors.insert(
        "sha512_truncated_basic".to_string(),
        TestVector {
            description: "SHA-512(b\"Subly test vector 1\")[..32]".to_string(),
            inputs: BTreeMap::from([("data".to_string(), "Subly test vector 1".to_string())]),
            outputs: BTreeMap::from([("hash".to_string(), hex::encode(digest))]),
        },
    );

    vectors
}

fn generate_commitment_vectors() -> BTreeMap<String, TestVector> {
    let mut vectors = BTreeMap::new();

    // Golden vector shared by every client.
    let secret = Secret::from_bytes([0x01; 32]);
    let context = ContextId::from_bytes([0x02; 32]);
    let commitment = subly_commitment::commit(&secret, &context);
    vectors.insert(
        "commitment_golden".to_string(),
        TestVector {
            description: "Commit(0x01*32, 0x02*32) = SHA-512(secret || context)[..32]".to_string(),
            inputs: BTreeMap::from([
                ("secret".to_string(), hex::encode([0x01u8; 32])),
                ("context_id".to_string(), hex::encode([0x02u8; 32])),
            ]),
            outputs: BTreeMap::from([(
                "commitment".to_string(),
                hex::encode(commitment.as_bytes()),
            )]),
        },
    );

    for (tag, nonce) in [(OperationTag::Withdraw, 7u64), (OperationTag::Transfer, 1u64)] {
        let nullifier = subly_commitment::nullify(&secret, tag, nonce);
        vectors.insert(
            format!("nullifier_{tag}"),
            TestVector {
                description: format!(
                    "Nullify(0x01*32, {tag}, {nonce}) = SHA-512(secret || \"{tag}\" || nonce_le64)[..32]"
                ),
                inputs: BTreeMap::from([
                    ("secret".to_string(), hex::encode([0x01u8; 32])),
                    ("operation".to_string(), tag.label().to_string()),
                    ("nonce".to_string(), nonce.to_string()),
                ]),
                outputs: BTreeMap::from([(
                    "nullifier".to_string(),
                    hex::encode(nullifier.as_bytes()),
                )]),
            },
        );
    }

    vectors
}

fn generate_ed25519_vectors() -> BTreeMap<String, TestVector> {
    let mut vectors = BTreeMap::new();

    // RFC 8032 Section 7.1, Test 1
    let secret_key = rfc8032_test1_secret();
    let kp = KeyPair::from_bytes(&secret_key);
    let sig = kp.signing_key.sign(b"");
    vectors.insert(
        "ed25519_rfc8032_test1".to_string(),
        TestVector {
            description: "RFC 8032 Section 7.1 Test 1: empty message".to_string(),
            inputs: BTreeMap::from([
                ("secret_key".to_string(), hex::encode(secret_key)),
                ("message".to_string(), String::new()),
            ]),
            outputs: BTreeMap::from([
                (
                    "public_key".to_string(),
                    hex::encode(kp.verifying_key.to_bytes()),
                ),
                ("signature".to_string(), hex::encode(sig.to_bytes())),
            ]),
        },
    );

    vectors
}

fn generate_key_derivation_vectors() -> BTreeMap<String, TestVector> {
    let mut vectors = BTreeMap::new();

    let password = "correct horse battery staple";
    let key = EncryptionKey::from_password(password);
    vectors.insert(
        "key_from_password".to_string(),
        TestVector {
            description: "SHA-512(utf8(password))[..32]".to_string(),
            inputs: BTreeMap::from([("password".to_string(), password.to_string())]),
            outputs: BTreeMap::from([("key".to_string(), hex::encode(key.as_bytes()))]),
        },
    );

    // Ed25519 is deterministic, so a wallet always recovers the same key.
    let wallet = SigningKey::from_bytes(&rfc8032_test1_secret());
    let signature = wallet.sign(subly_codec::KEY_DERIVATION_MESSAGE.as_bytes());
    let key = EncryptionKey::from_signature(&signature.to_bytes());
    vectors.insert(
        "key_from_wallet_signature".to_string(),
        TestVector {
            description: "SHA-512(Ed25519.sign(wallet, KEY_DERIVATION_MESSAGE))[..32]".to_string(),
            inputs: BTreeMap::from([
                (
                    "wallet_secret_key".to_string(),
                    hex::encode(rfc8032_test1_secret()),
                ),
                (
                    "message".to_string(),
                    subly_codec::KEY_DERIVATION_MESSAGE.to_string(),
                ),
            ]),
            outputs: BTreeMap::from([
                ("signature".to_string(), hex::encode(signature.to_bytes())),
                ("key".to_string(), hex::encode(key.as_bytes())),
            ]),
        },
    );

    vectors
}

fn generate_envelope_vectors() -> anyhow::Result<BTreeMap<String, TestVector>> {
    let mut vectors = BTreeMap::new();

    // Envelopes normally take a random nonce; a fixed one pins the layout.
    let key = EncryptionKey::from_password("correct horse battery staple");
    let nonce = [0x24u8; xchacha20::NONCE_SIZE];
    let value = 1_000_000u64;
    let mut window = [0u8; 24];
    window[..8].copy_from_slice(&value.to_le_bytes());
    let ciphertext = xchacha20::encrypt_no_aad(key.as_bytes(), &nonce, &window)?;
    let envelope = [&nonce[..], &ciphertext[..]].concat();
    vectors.insert(
        "integer_envelope_fixed_nonce".to_string(),
        TestVector {
            description: "nonce || XChaCha20-Poly1305(key, nonce, u64_le || 0x00*16) for 1000000"
                .to_string(),
            inputs: BTreeMap::from([
                ("key".to_string(), hex::encode(key.as_bytes())),
                ("nonce".to_string(), hex::encode(nonce)),
                ("value".to_string(), value.to_string()),
            ]),
            outputs: BTreeMap::from([("envelope".to_string(), hex::encode(envelope))]),
        },
    );

    Ok(vectors)
}

fn generate_membership_vectors() -> anyhow::Result<BTreeMap<String, TestVector>> {
    let mut vectors = BTreeMap::new();

    let issuer = SigningKey::from_bytes(&rfc8032_test1_secret());
    let plan_id = ContextId::from_bytes([0x0a; 32]);
    let commitment = Commitment::from_bytes([0x0c; 32]);
    let nonce = [0x0e; 32];
    let valid_until = 1_750_003_600i64;

    let message = proof_message(&plan_id, &commitment, &nonce, valid_until);
    let signature = issuer.sign(&message).to_bytes();
    vectors.insert(
        "membership_proof_message".to_string(),
        TestVector {
            description: "plan_id || commitment || nonce || valid_until_le64, signed with Ed25519"
                .to_string(),
            inputs: BTreeMap::from([
                ("plan_id".to_string(), hex::encode(plan_id.as_bytes())),
                ("commitment".to_string(), hex::encode(commitment.as_bytes())),
                ("nonce".to_string(), hex::encode(nonce)),
                ("valid_until".to_string(), valid_until.to_string()),
                (
                    "issuer_secret_key".to_string(),
                    hex::encode(rfc8032_test1_secret()),
                ),
            ]),
            outputs: BTreeMap::from([
                ("message".to_string(), hex::encode(message)),
                ("signature".to_string(), hex::encode(signature)),
            ]),
        },
    );

    let proof = MembershipProof {
        plan_id,
        membership_commitment: commitment,
        validity_proof: ValidityProof::default(),
        root_index: 1,
        leaf_index: 42,
        proof_timestamp: valid_until - 3_600,
        valid_until,
        signature,
        nonce,
    };
    vectors.insert(
        "membership_proof_wire".to_string(),
        TestVector {
            description: "312-byte proof wire encoding of the signed proof above".to_string(),
            inputs: BTreeMap::from([
                ("root_index".to_string(), proof.root_index.to_string()),
                ("leaf_index".to_string(), proof.leaf_index.to_string()),
                (
                    "proof_timestamp".to_string(),
                    proof.proof_timestamp.to_string(),
                ),
            ]),
            outputs: BTreeMap::from([("wire".to_string(), hex::encode(proof.to_bytes()?))]),
        },
    );

    Ok(vectors)
}

fn rfc8032_test1_secret() -> [u8; 32] {
    [
        0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c,
        0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae,
        0x7f, 0x60,
    ]
}

fn generate_all_vectors() -> anyhow::Result<TestVectors> {
    let mut all_vectors = BTreeMap::new();

    all_vectors.extend(generate_hash_vectors());
    all_vectors.extend(generate_commitment_vectors());
    all_vectors.extend(generate_ed25519_vectors());
    all_vectors.extend(generate_key_derivation_vectors());
    all_vectors.extend(generate_envelope_vectors()?);
    all_vectors.extend(generate_membership_vectors()?);

    Ok(TestVectors {
        version: "1.0".to_string(),
        generated_by: "subly-testvec".to_string(),
        vectors: all_vectors,
    })
}

fn verify_vectors(vectors: &TestVectors) -> anyhow::Result<bool> {
    let regenerated = generate_all_vectors()?;
    let mut all_pass = true;

    for (name, expected) in &vectors.vectors {
        match regenerated.vectors.get(name) {
            Some(actual) if actual.outputs == expected.outputs => info!("PASS: {name}"),
            Some(actual) => {
                error!(
                    expected = ?expected.outputs,
                    actual = ?actual.outputs,
                    "FAIL: {name}"
                );
                all_pass = false;
            }
            None => {
                error!("MISSING: {name}");
                all_pass = false;
            }
        }
    }

    Ok(all_pass)
}

fn write_vectors(path: &Path, vectors: &TestVectors) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(vectors)?)?;
    info!(
        "Generated {} test vectors to {}",
        vectors.vectors.len(),
        path.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("subly=info".parse()?),
        )
        .init();

    let path = Path::new(FIXTURE_PATH);
    let verify = std::env::args().any(|a| a == "--verify");

    let vectors = if verify && path.exists() {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str::<TestVectors>(&content)?
    } else {
        if verify {
            info!("No existing test vectors at {}. Generating...", path.display());
        }
        let vectors = generate_all_vectors()?;
        write_vectors(path, &vectors)?;
        vectors
    };

    if !verify_vectors(&vectors)? {
        anyhow::bail!("test vector verification failed");
    }
    info!("All test vectors verified successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_are_reproducible() {
        let vectors = generate_all_vectors().expect("generate");
        assert!(verify_vectors(&vectors).expect("verify"));
    }

    #[test]
    fn test_commitment_golden_in_set() {
        let vectors = generate_all_vectors().expect("generate");
        let golden = &vectors.vectors["commitment_golden"];
        assert_eq!(
            golden.outputs["commitment"],
            "fc921a960a9867283a6958fbef4e5d89123dd3d28773ef73339d0a41b2796b37"
        );
    }

    #[test]
    fn test_rfc8032_public_key() {
        let vectors = generate_all_vectors().expect("generate");
        assert_eq!(
            vectors.vectors["ed25519_rfc8032_test1"].outputs["public_key"],
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn test_tampered_vector_detected() {
        let mut vectors = generate_all_vectors().expect("generate");
        if let Some(v) = vectors.vectors.get_mut("nullifier_withdraw") {
            v.outputs.insert("nullifier".to_string(), "00".repeat(32));
        }
        assert!(!verify_vectors(&vectors).expect("verify"));
    }

    #[test]
    fn test_envelope_vector_decrypts() {
        let vectors = generate_all_vectors().expect("generate");
        let envelope =
            hex::decode(&vectors.vectors["integer_envelope_fixed_nonce"].outputs["envelope"])
                .expect("hex");
        let key = EncryptionKey::from_password("correct horse battery staple");
        assert_eq!(
            subly_codec::decrypt_u64(&envelope, &key).expect("decrypt"),
            1_000_000
        );
    }
}
