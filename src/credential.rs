//! Splitting of the stored REST auth code into its salt and secret.
//!
//! The auth code is persisted as one string. At load time it is split into
//! two byte sequences that live outside the preference store and are
//! recomputed on every load.

use {
    base64::{Engine, engine::general_purpose::STANDARD},
    tracing::debug,
};

/// Separator between the encoded salt and encoded secret.
pub const FIELD_SEPARATOR: char = ':';

/// Salt and encrypted secret derived from the stored auth code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestCredentials {
    /// Salt bytes.
    pub salt: Vec<u8>,
    /// Encrypted secret bytes.
    pub encrypted: Vec<u8>,
}

impl RestCredentials {
    /// Returns whether no credential is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.salt.is_empty() && self.encrypted.is_empty()
    }
}

/// Converts between the stored auth code and its internal form.
pub trait CredentialCodec {
    /// Splits the stored form into salt and encrypted secret.
    ///
    /// Must be a pure function of `external` and never fail; unusable input
    /// yields empty credentials.
    fn internal_rep(&self, external: &str) -> RestCredentials;

    /// Joins salt and encrypted secret into the stored form.
    fn external_rep(&self, credentials: &RestCredentials) -> String;
}

/// Codec storing `base64(salt):base64(encrypted)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64CredentialCodec;

impl CredentialCodec for Base64CredentialCodec {
    fn internal_rep(&self, external: &str) -> RestCredentials {
        let Some((salt, encrypted)) = external.trim().split_once(FIELD_SEPARATOR) else {
            if !external.is_empty() {
                debug!("Auth code has no separator, treating as unset");
            }
            return RestCredentials::default();
        };

        match (STANDARD.decode(salt), STANDARD.decode(encrypted)) {
            (Ok(salt), Ok(encrypted)) => RestCredentials { salt, encrypted },
            _ => {
                debug!("Auth code is not valid base64, treating as unset");
                RestCredentials::default()
            }
        }
    }

    fn external_rep(&self, credentials: &RestCredentials) -> String {
        if credentials.is_empty() {
            return String::new();
        }
        format!(
            "{}{}{}",
            STANDARD.encode(&credentials.salt),
            FIELD_SEPARATOR,
            STANDARD.encode(&credentials.encrypted)
        )
    }
}
