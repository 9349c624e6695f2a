use std::fmt;

use thiserror::Error;

// Minimum length for an access key.
const ACCESS_KEY_MIN_LEN: usize = 3;

// Minimum length for a secret key.
const SECRET_KEY_MIN_LEN: usize = 8;

pub fn is_access_key_valid(access_key: &str) -> bool {
    access_key.len() >= ACCESS_KEY_MIN_LEN
}

pub fn is_secret_key_valid(secret_key: &str) -> bool {
    secret_key.len() >= SECRET_KEY_MIN_LEN
}

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("access key length should be at least {}", ACCESS_KEY_MIN_LEN)]
    InvalidAccessKeyLen,
    #[error("secret key length should be at least {}", SECRET_KEY_MIN_LEN)]
    InvalidSecretKeyLen,
}

// Credentials holds access and secret keys used to sign admin requests.
#[derive(Clone, Default)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: &str, secret_key: &str) -> Result<Credentials, AuthError> {
        if !is_access_key_valid(access_key) {
            return Err(AuthError::InvalidAccessKeyLen);
        }
        if !is_secret_key_valid(secret_key) {
            return Err(AuthError::InvalidSecretKeyLen);
        }
        Ok(Credentials {
            access_key: access_key.to_owned(),
            secret_key: secret_key.to_owned(),
        })
    }
}

// Never print the secret key.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"*REDACTED*")
            .finish()
    }
}
