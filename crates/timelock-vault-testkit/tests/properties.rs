//! End-to-end properties of the encrypt / decrypt transactions.

use proptest::prelude::*;
use serde_json::{Map, Value};

use timelock_vault::core::{resolve_duration, LockedArtifact};
use timelock_vault::store::VaultStore;
use timelock_vault::{DecryptOutcome, ErrorKind, VaultError};
use timelock_vault_testkit::generators::SealParams;
use timelock_vault_testkit::vectors::{legacy_record, LEGACY_ARTIFACT, LEGACY_PLAINTEXT};
use timelock_vault_testkit::{init_tracing, TestFixture, FIXTURE_START};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn edit(bytes: &[u8], f: impl FnOnce(&mut Map<String, Value>)) -> Vec<u8> {
    let mut value: Value = serde_json::from_slice(bytes).unwrap();
    f(value.as_object_mut().unwrap());
    serde_json::to_vec(&value).unwrap()
}

#[tokio::test]
async fn hello_vault_unlocks_after_one_hour() {
    init_tracing();
    let fixture = TestFixture::new();

    let sealed = fixture
        .vault
        .encrypt(b"hello, vault!", "1h", "hello.txt")
        .await
        .unwrap();
    assert_eq!(sealed.metadata.unlock_at, FIXTURE_START + 3_600);
    assert_eq!(sealed.metadata.unlock_at_iso, "2023-11-14T23:13:20+00:00");
    assert_eq!(sealed.metadata.duration, "1h");

    for step in [0, 1_800, 1_799] {
        fixture.advance(step);
        let outcome = fixture.vault.decrypt(&sealed.bytes).await.unwrap();
        assert!(outcome.is_locked(), "unlocked early at +{}", fixture.now() - FIXTURE_START);
    }

    fixture.advance(1);
    match fixture.vault.decrypt(&sealed.bytes).await.unwrap() {
        DecryptOutcome::Released(file) => {
            assert_eq!(&file.plaintext[..], b"hello, vault!");
            assert_eq!(file.original_name, "hello.txt");
        }
        DecryptOutcome::Locked(status) => panic!("still locked: {:?}", status),
    }
}

#[tokio::test]
async fn locked_outcome_reports_remaining_time() {
    let fixture = TestFixture::new();
    let sealed = fixture.vault.encrypt(b"later", "1week", "w").await.unwrap();
    fixture.advance(12_345);

    let DecryptOutcome::Locked(status) = fixture.vault.decrypt(&sealed.bytes).await.unwrap() else {
        panic!("expected locked");
    };
    assert_eq!(status.remaining_seconds, sealed.metadata.unlock_at - fixture.now());
    assert_eq!(status.remaining_seconds, 604_800 - 12_345);
    assert_eq!(status.remaining_human, "6d 20h 34m 15s");
    assert_eq!(status.unlock_at_iso, sealed.metadata.unlock_at_iso);
    assert!(status.message().starts_with("This file unlocks in "));
}

#[tokio::test]
async fn locked_outcome_leaks_no_plaintext() {
    let fixture = TestFixture::new();
    let sealed = fixture.vault.encrypt(b"top secret words", "1h", "s").await.unwrap();

    let outcome = fixture.vault.decrypt(&sealed.bytes).await.unwrap();
    let rendered = format!("{:?}", outcome);
    assert!(!rendered.contains("top secret words"));
}

#[tokio::test]
async fn forged_artifact_with_wrong_secret_is_integrity_failure() {
    let victim = TestFixture::new();
    let forger = TestFixture::with_secret("attacker-guess");

    // A well-formed, already-unlockable artifact whose id is absent from the
    // victim's store, signed with the wrong secret.
    let forged = forger.vault.encrypt(b"payload", "1h", "f").await.unwrap();
    victim.advance(10 * 86_400);

    let err = victim.vault.decrypt(&forged.bytes).await.unwrap_err();
    assert!(matches!(err, VaultError::IntegrityFailure), "got {:?}", err);
    assert_eq!(err.kind(), ErrorKind::IntegrityFailure);
}

#[tokio::test]
async fn two_encryptions_never_share_id_nonce_or_ciphertext() {
    let fixture = TestFixture::new();
    let a = fixture.vault.encrypt(b"same bytes", "1d", "x").await.unwrap();
    let b = fixture.vault.encrypt(b"same bytes", "1d", "x").await.unwrap();

    assert_ne!(a.artifact.id, b.artifact.id);
    assert_ne!(a.artifact.nonce, b.artifact.nonce);
    assert_ne!(a.artifact.ciphertext, b.artifact.ciphertext);
    assert_eq!(fixture.vault.store().count().await.unwrap(), 2);
}

#[tokio::test]
async fn legacy_artifact_decrypts() {
    let fixture = TestFixture::new();
    fixture.vault.store().put(&legacy_record()).await.unwrap();

    let outcome = fixture.vault.decrypt(LEGACY_ARTIFACT.as_bytes()).await.unwrap();
    assert!(outcome.is_locked());

    fixture.advance(3_600);
    let file = fixture
        .vault
        .decrypt(LEGACY_ARTIFACT.as_bytes())
        .await
        .unwrap()
        .released()
        .unwrap();
    assert_eq!(&file.plaintext[..], LEGACY_PLAINTEXT);
    assert_eq!(file.original_name, "greeting.txt");
}

#[test]
fn duration_table_fixed_points() {
    assert_eq!(resolve_duration("1year"), Some(31_536_000));
    assert_eq!(resolve_duration("bogus"), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn round_trip_after_unlock(params: SealParams) {
        let rt = runtime();
        let fixture = TestFixture::new();

        let sealed = rt
            .block_on(fixture.vault.encrypt(&params.plaintext, params.duration, &params.filename))
            .unwrap();
        fixture.advance(sealed.metadata.unlock_at - fixture.now());

        let file = rt
            .block_on(fixture.vault.decrypt(&sealed.bytes))
            .unwrap()
            .released()
            .unwrap();
        prop_assert_eq!(&file.plaintext[..], &params.plaintext[..]);
        prop_assert_eq!(file.original_name, params.filename);
    }

    #[test]
    fn locked_before_unlock(params: SealParams, fraction in 0.0f64..1.0) {
        let rt = runtime();
        let fixture = TestFixture::new();

        let sealed = rt
            .block_on(fixture.vault.encrypt(&params.plaintext, params.duration, &params.filename))
            .unwrap();
        let total = sealed.metadata.unlock_at - fixture.now();
        let elapsed = ((total as f64) * fraction) as i64;
        fixture.advance(elapsed.min(total - 1));

        match rt.block_on(fixture.vault.decrypt(&sealed.bytes)).unwrap() {
            DecryptOutcome::Locked(status) => {
                prop_assert_eq!(status.remaining_seconds, sealed.metadata.unlock_at - fixture.now());
                prop_assert!(status.remaining_seconds > 0);
            }
            DecryptOutcome::Released(_) => prop_assert!(false, "released before unlock"),
        }
    }

    #[test]
    fn signed_field_tamper_is_integrity_failure(
        params: SealParams,
        byte_index in any::<prop::sample::Index>(),
        bit in 0u8..7,
        shift in 1i64..1_000_000,
        tamper_id in any::<bool>(),
    ) {
        let rt = runtime();
        let fixture = TestFixture::new();

        let sealed = rt
            .block_on(fixture.vault.encrypt(&params.plaintext, params.duration, &params.filename))
            .unwrap();

        let forged = if tamper_id {
            let mut id = sealed.artifact.id.as_str().as_bytes().to_vec();
            let i = byte_index.index(id.len());
            // Flipping a low bit keeps the id ASCII.
            id[i] ^= 1 << bit;
            let id = String::from_utf8(id).unwrap();
            edit(&sealed.bytes, |obj| {
                obj.insert("id".into(), Value::String(id));
            })
        } else {
            let unlock_at = sealed.metadata.unlock_at - shift;
            edit(&sealed.bytes, |obj| {
                obj.insert("unlock_at".into(), unlock_at.into());
            })
        };

        // Past any unlock time, so only the signature can stop it.
        fixture.advance(2 * 31_536_000);
        let result = rt.block_on(fixture.vault.decrypt(&forged));
        prop_assert!(matches!(result, Err(VaultError::IntegrityFailure)), "got {:?}", result);
    }

    #[test]
    fn ciphertext_tamper_is_decryption_failure(
        params: SealParams,
        byte_index in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let rt = runtime();
        let fixture = TestFixture::new();

        let sealed = rt
            .block_on(fixture.vault.encrypt(&params.plaintext, params.duration, &params.filename))
            .unwrap();

        let mut artifact = LockedArtifact::from_bytes(&sealed.bytes).unwrap();
        let i = byte_index.index(artifact.ciphertext.len());
        artifact.ciphertext[i] ^= mask;
        let tampered = artifact.to_bytes().unwrap();

        fixture.advance(sealed.metadata.unlock_at - fixture.now());
        let result = rt.block_on(fixture.vault.decrypt(&tampered));
        prop_assert!(matches!(result, Err(VaultError::DecryptionFailed(_))), "got {:?}", result);
    }
}
