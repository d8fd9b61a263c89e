//! The process-wide store is shared by every test in a binary, so all
//! assertions against it live in this single test.

use pwd_core::global::{current_configuration, hash_password, set_configuration, verify_password};
use pwd_core::{decode_hash, Argon2Parameters};

#[test]
fn test_global_configuration_lifecycle() {
    assert_eq!(current_configuration(), Argon2Parameters::DEFAULT);

    let active = set_configuration(Argon2Parameters {
        memory_kib: 256,
        iterations: 2,
        parallelism: 1,
        salt_length: 0,
        key_length: 0,
    });
    assert_eq!(active, current_configuration());
    assert_eq!(active.salt_length, 16);
    assert_eq!(active.key_length, 32);

    let encoded = hash_password(b"password").expect("hash should succeed");
    assert!(encoded.starts_with("$argon2id$v=19$m=256,t=2,p=1$"));

    // Verifying a hash made with other parameters leaves the active set alone
    let foreign = pwd_core::hash_password(
        b"password",
        &Argon2Parameters {
            memory_kib: 512,
            iterations: 1,
            parallelism: 2,
            salt_length: 24,
            key_length: 48,
        },
    )
    .expect("hash should succeed");
    assert!(verify_password(b"password", &foreign).expect("verify should succeed"));
    assert!(decode_hash(&foreign).is_ok());
    assert_eq!(current_configuration(), active);

    assert!(verify_password(b"password", &encoded).expect("verify should succeed"));
    assert!(!verify_password(b"wrong", &encoded).expect("verify should succeed"));

    set_configuration(Argon2Parameters {
        memory_kib: 0,
        iterations: 0,
        parallelism: 0,
        salt_length: 0,
        key_length: 0,
    });
    assert_eq!(current_configuration(), Argon2Parameters::DEFAULT);
}
