use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2id with a fresh random salt, encoded as a PHC string.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!("hash password: {e}")
        })
}

/// Well-formed PHC string with the default Argon2 cost that matches no password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Spend one verification's worth of work on a login that has no stored
/// hash, so unknown and known emails answer in about the same time.
pub fn verify_against_dummy(plain: &str) {
    let _ = verify_password(plain, DUMMY_HASH);
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash cannot be parsed.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("parse password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_PASSWORD: &str = "catalog-admin-2024";

    #[test]
    fn stored_hash_is_salted_phc_string() {
        let hash = hash_password(ADMIN_PASSWORD).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains(ADMIN_PASSWORD));
        assert_ne!(hash, hash_password(ADMIN_PASSWORD).unwrap());
    }

    #[test]
    fn only_the_exact_password_matches() {
        let hash = hash_password(ADMIN_PASSWORD).unwrap();
        assert!(verify_password(ADMIN_PASSWORD, &hash).unwrap());
        assert!(!verify_password("catalog-admin-2025", &hash).unwrap());
        assert!(!verify_password("Catalog-admin-2024", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn unparsable_stored_hash_is_an_error() {
        assert!(verify_password(ADMIN_PASSWORD, "plaintext-in-db").is_err());
    }

    #[test]
    fn dummy_hash_parses_and_never_matches() {
        assert!(!verify_password(ADMIN_PASSWORD, DUMMY_HASH).unwrap());
        assert!(!verify_password("", DUMMY_HASH).unwrap());
        verify_against_dummy(ADMIN_PASSWORD);
    }
}
