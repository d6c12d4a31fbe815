use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password is empty")]
    EmptyPassword,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

fn hasher(time_cost: u32) -> Result<Argon2<'static>, PasswordError> {
    if time_cost == 0 {
        return Ok(Argon2::default());
    }
    let params = Params::new(
        Params::DEFAULT_M_COST,
        time_cost,
        Params::DEFAULT_P_COST,
        None,
    )
    .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hashes a password into a self-contained PHC string. The salt and cost
/// parameters are embedded, so verification needs nothing but the string.
pub fn hash_password(plain: &str, time_cost: u32) -> Result<String, PasswordError> {
    if plain.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = hasher(time_cost)?;
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            PasswordError::Hash(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        PasswordError::Hash(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password, 0).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password, 0).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn hashing_is_salted_per_call() {
        let password = "same-input";
        let first = hash_password(password, 0).expect("hash");
        let second = hash_password(password, 0).expect("hash");
        assert_ne!(first, second);
        assert!(verify_password(password, &first).unwrap());
        assert!(verify_password(password, &second).unwrap());
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = hash_password("", 0).unwrap_err();
        assert!(matches!(err, PasswordError::EmptyPassword));
    }

    #[test]
    fn explicit_time_cost_still_verifies() {
        let hash = hash_password("pw-with-cost", 3).expect("hash");
        assert!(verify_password("pw-with-cost", &hash).expect("verify"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
